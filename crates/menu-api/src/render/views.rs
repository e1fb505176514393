//! Template view models
//!
//! Every value a template prints is prepared here; templates only branch on
//! booleans and iterate lists.

use serde::Serialize;

use menu_core::domain::menu_item::variants_to_text;
use menu_core::pricing::format_price;
use menu_core::services::{AdminSnapshot, CategoryPage, HomePage};
use menu_core::{Category, Layout, MenuItem, SiteConfig};
use menu_shared::config::SiteSettings;

use crate::error::ApiError;

const ICON_FACEBOOK: &str = concat!(
    "M22 12a10 10 0 1 0-11.6 9.9v-7h-2.5V12h2.5V9.8c0-2.5 1.5-3.9 3.8-3.9 1.1 0",
    " 2.2.2 2.2.2v2.5h-1.3c-1.2 0-1.6.8-1.6 1.6V12h2.8l-.4 3h-2.4v7A10 10 0 0 0 22 12z"
);
const ICON_INSTAGRAM: &str = concat!(
    "M7 2h10a5 5 0 0 1 5 5v10a5 5 0 0 1-5 5H7a5 5 0 0 1-5-5V7a5 5 0 0 1 5-5zm5",
    " 5a5 5 0 1 0 0 10 5 5 0 0 0 0-10zm6-1.5a1.5 1.5 0 1 0 0 3 1.5 1.5 0 0 0 0-3z"
);
const ICON_X: &str = "M3 3l7 7-7 7h3l5-5 5 5h3l-7-7 7-7h-3l-5 5-5-5H3z";

#[derive(Debug, Serialize)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: String,
    pub icon: &'static str,
}

/// Header, footer and modal data shared by every page.
#[derive(Debug, Serialize)]
pub struct PageChrome {
    pub lang: String,
    pub title: String,
    pub site_title: String,
    pub logo: String,
    pub favicon: String,
    pub header_bg: String,
    pub footer_bg: String,
    pub wifi_password: String,
    pub social: Vec<SocialLink>,
    pub show_search: bool,
    pub overlay_header: bool,
}

impl PageChrome {
    pub fn new(config: &SiteConfig, site: &SiteSettings, title: impl Into<String>) -> Self {
        let social = [
            ("Facebook", &config.social.facebook, ICON_FACEBOOK),
            ("Instagram", &config.social.instagram, ICON_INSTAGRAM),
            ("X", &config.social.twitter, ICON_X),
        ]
        .into_iter()
        .filter(|(_, url, _)| !url.trim().is_empty())
        .map(|(label, url, icon)| SocialLink {
            label,
            url: url.clone(),
            icon,
        })
        .collect();

        Self {
            lang: site.lang.clone(),
            title: title.into(),
            site_title: config.display_title().to_string(),
            logo: config.logo.clone(),
            favicon: config.favicon.clone(),
            header_bg: config.header_bg.clone(),
            footer_bg: config.footer_bg.clone(),
            wifi_password: config.wifi_password.clone(),
            social,
            show_search: false,
            overlay_header: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct VariantView<'a> {
    name: &'a str,
    price: String,
}

/// A menu item as shown on the public pages.
#[derive(Debug, Serialize)]
pub struct ItemCard {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub category_id: String,
    pub has_variants: bool,
    /// JSON list of `{name, price}` with display prices, read by the variants modal.
    pub variants_json: String,
}

impl ItemCard {
    pub fn from_item(item: &MenuItem) -> Result<Self, ApiError> {
        let variants: Vec<VariantView<'_>> = item
            .variants
            .iter()
            .map(|v| VariantView {
                name: &v.name,
                price: format_price(&v.price),
            })
            .collect();

        Ok(Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: format_price(&item.price),
            image: item.image.clone(),
            description: item.description.clone(),
            category_id: item.category_id.clone(),
            has_variants: !variants.is_empty(),
            variants_json: serde_json::to_string(&variants)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryTile {
    pub id: String,
    pub name: String,
    pub image: String,
    pub layout: &'static str,
}

impl From<&Category> for CategoryTile {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            image: category.image.clone(),
            layout: category.layout.as_str(),
        }
    }
}

#[derive(Serialize)]
struct SearchCategory<'a> {
    id: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct SearchItem<'a> {
    id: &'a str,
    name: &'a str,
    category_id: &'a str,
}

#[derive(Serialize)]
struct SearchIndex<'a> {
    categories: Vec<SearchCategory<'a>>,
    menu: Vec<SearchItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub chrome: PageChrome,
    pub favorites: Vec<ItemCard>,
    pub categories: Vec<CategoryTile>,
    /// Script-safe JSON for `window.__SEARCH__`.
    pub search_json: String,
}

impl HomeView {
    pub fn build(page: &HomePage, site: &SiteSettings) -> Result<Self, ApiError> {
        let mut chrome = PageChrome::new(&page.config, site, page.config.display_title());
        chrome.show_search = true;

        let index = SearchIndex {
            categories: page
                .categories
                .iter()
                .map(|c| SearchCategory { id: &c.id, name: &c.name })
                .collect(),
            menu: page
                .searchable_items
                .iter()
                .map(|m| SearchItem {
                    id: &m.id,
                    name: &m.name,
                    category_id: &m.category_id,
                })
                .collect(),
        };

        Ok(Self {
            chrome,
            favorites: page.favorites.iter().map(ItemCard::from_item).collect::<Result<_, _>>()?,
            categories: page.categories.iter().map(CategoryTile::from).collect(),
            search_json: script_safe_json(&index)?,
        })
    }
}

/// JSON that cannot terminate the surrounding `<script>` element.
fn script_safe_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub chrome: PageChrome,
    pub category: CategoryTile,
    pub items: Vec<ItemCard>,
}

impl CategoryView {
    pub fn build(page: &CategoryPage, site: &SiteSettings) -> Result<Self, ApiError> {
        let title = format!("{} - {}", page.category.name, page.config.display_title());
        let mut chrome = PageChrome::new(&page.config, site, title);
        chrome.overlay_header = true;

        Ok(Self {
            chrome,
            category: CategoryTile::from(&page.category),
            items: page.items.iter().map(ItemCard::from_item).collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub chrome: PageChrome,
    pub heading: &'static str,
    pub action: &'static str,
    pub button: &'static str,
    pub error: Option<String>,
}

impl LoginView {
    pub fn new(config: &SiteConfig, site: &SiteSettings, error: Option<&str>) -> Self {
        let (heading, action, button) = if config.has_admin_password() {
            ("Admin Giriş", "login", "Giriş")
        } else {
            ("Admin Şifre Oluştur", "set_admin_password", "Kaydet")
        };
        Self {
            chrome: PageChrome::new(config, site, heading),
            heading,
            action,
            button,
            error: error.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LayoutOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn layout_options(current: Layout) -> Vec<LayoutOption> {
    Layout::ALL
        .iter()
        .map(|layout| LayoutOption {
            value: layout.as_str(),
            label: layout.label(),
            selected: *layout == current,
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct SettingsForm {
    pub site_title: String,
    pub logo: String,
    pub favicon: String,
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
    pub wifi_password: String,
    pub header_bg: String,
    pub footer_bg: String,
}

#[derive(Debug, Serialize)]
pub struct AdminCategoryRow {
    pub id: String,
    pub name: String,
    pub image: String,
    pub visible: bool,
    pub layout_label: &'static str,
    pub layout_options: Vec<LayoutOption>,
}

#[derive(Debug, Serialize)]
pub struct AdminItemRow {
    pub id: String,
    pub name: String,
    pub price: String,
    pub price_display: String,
    pub image: String,
    pub favorite: bool,
    pub category_name: String,
    pub description: String,
    pub variants_text: String,
    pub category_options: Vec<CategoryOption>,
}

#[derive(Debug, Serialize)]
pub struct AdminView {
    pub chrome: PageChrome,
    pub settings: SettingsForm,
    pub new_category_layouts: Vec<LayoutOption>,
    pub categories: Vec<AdminCategoryRow>,
    pub new_item_categories: Vec<CategoryOption>,
    pub items: Vec<AdminItemRow>,
    pub has_password: bool,
    pub description_max_chars: usize,
}

impl AdminView {
    pub fn build(snapshot: &AdminSnapshot, site: &SiteSettings) -> Self {
        let config = &snapshot.config;
        let category_options = |selected: &str| -> Vec<CategoryOption> {
            snapshot
                .categories
                .iter()
                .map(|c| CategoryOption {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    selected: c.id == selected,
                })
                .collect()
        };

        let categories = snapshot
            .categories
            .iter()
            .map(|c| AdminCategoryRow {
                id: c.id.clone(),
                name: c.name.clone(),
                image: c.image.clone(),
                visible: c.visible,
                layout_label: c.layout.label(),
                layout_options: layout_options(c.layout),
            })
            .collect();

        let items = snapshot
            .menu
            .iter()
            .map(|item| AdminItemRow {
                id: item.id.clone(),
                name: item.name.clone(),
                price: item.price.clone(),
                price_display: format_price(&item.price),
                image: item.image.clone(),
                favorite: item.favorite,
                category_name: snapshot
                    .categories
                    .iter()
                    .find(|c| item.belongs_to(&c.id))
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                description: item.description.clone(),
                variants_text: variants_to_text(&item.variants),
                category_options: category_options(&item.category_id),
            })
            .collect();

        Self {
            chrome: PageChrome::new(config, site, "Admin"),
            settings: SettingsForm {
                site_title: config.site_title.clone(),
                logo: config.logo.clone(),
                favicon: config.favicon.clone(),
                facebook: config.social.facebook.clone(),
                instagram: config.social.instagram.clone(),
                twitter: config.social.twitter.clone(),
                wifi_password: config.wifi_password.clone(),
                header_bg: color_or_white(&config.header_bg),
                footer_bg: color_or_white(&config.footer_bg),
            },
            new_category_layouts: layout_options(Layout::default()),
            categories,
            new_item_categories: category_options(""),
            items,
            has_password: config.has_admin_password(),
            description_max_chars: site.description_max_chars,
        }
    }
}

fn color_or_white(value: &str) -> String {
    if value.is_empty() {
        "#ffffff".to_string()
    } else {
        value.to_string()
    }
}
