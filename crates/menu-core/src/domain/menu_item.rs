//! Menu item entity

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::coerce::{lenient_bool, lenient_string, record_from_value};
use super::new_id;

/// A named price option of a menu item, e.g. "Küçük | 80".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuVariant {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category_id: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub favorite: bool,
    #[serde(
        rename = "desc",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient_variants",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub variants: Vec<MenuVariant>,
}

/// Validated input for a new menu item.
#[derive(Debug, Clone, Default)]
pub struct NewMenuItem {
    pub name: String,
    pub price: String,
    pub category_id: String,
    pub favorite: bool,
    pub description: String,
    pub variants: Vec<MenuVariant>,
    pub image: Option<String>,
}

impl MenuItem {
    pub const ID_PREFIX: char = 'm';

    pub fn new(input: NewMenuItem) -> Self {
        Self {
            id: new_id(Self::ID_PREFIX),
            name: input.name,
            price: input.price,
            image: input.image.unwrap_or_default(),
            category_id: input.category_id,
            favorite: input.favorite,
            description: input.description,
            variants: input.variants,
        }
    }

    pub fn belongs_to(&self, category_id: &str) -> bool {
        self.category_id == category_id
    }
}

fn lenient_variants<'de, D>(deserializer: D) -> Result<Vec<MenuVariant>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(record_from_value::<MenuVariant>)
        .filter(|variant| !variant.name.trim().is_empty())
        .collect())
}

/// Parses the admin textarea format: one `name | price` pair per line.
///
/// Lines without a name are ignored; a line without `|` is a variant with
/// no price.
pub fn parse_variants(text: &str) -> Vec<MenuVariant> {
    text.lines()
        .filter_map(|line| {
            let (name, price) = line.split_once('|').unwrap_or((line, ""));
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(MenuVariant {
                name: name.to_string(),
                price: price.trim().to_string(),
            })
        })
        .collect()
}

/// Inverse of [`parse_variants`], used to pre-fill the admin form.
pub fn variants_to_text(variants: &[MenuVariant]) -> String {
    variants
        .iter()
        .map(|v| {
            if v.price.is_empty() {
                v.name.clone()
            } else {
                format!("{} | {}", v.name, v.price)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trims a description and caps it at `max_chars` characters.
pub fn clamp_description(raw: &str, max_chars: usize) -> String {
    raw.trim().chars().take(max_chars).collect::<String>().trim_end().to_string()
}
