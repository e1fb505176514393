//! Category entity

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::coerce::{lenient_bool, lenient_string};
use super::new_id;

/// Presentation style of a category tile on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Full,
    #[default]
    Two,
    Vertical,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Two, Layout::Full, Layout::Vertical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Full => "full",
            Layout::Two => "two",
            Layout::Vertical => "vertical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "full" => Some(Layout::Full),
            "two" => Some(Layout::Two),
            "vertical" => Some(Layout::Vertical),
            _ => None,
        }
    }

    /// Unknown values coerce to the default layout.
    pub fn coerce(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }

    /// Label used in the admin console.
    pub fn label(&self) -> &'static str {
        match self {
            Layout::Full => "Tam",
            Layout::Two => "Yan Yana",
            Layout::Vertical => "Dikey",
        }
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Layout::coerce).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: String,
    /// A record without this field stays hidden until an admin shows it.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub visible: bool,
    #[serde(default)]
    pub layout: Layout,
}

impl Category {
    pub const ID_PREFIX: char = 'c';

    /// New categories start out visible.
    pub fn new(name: String, image: Option<String>, layout: Layout) -> Self {
        Self {
            id: new_id(Self::ID_PREFIX),
            name,
            image: image.unwrap_or_default(),
            visible: true,
            layout,
        }
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }
}
