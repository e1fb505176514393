//! Page rendering with handlebars templates compiled into the binary

pub mod views;

use std::sync::Arc;

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::ApiError;

pub const HOME: &str = "home";
pub const CATEGORY: &str = "category";
pub const LOGIN: &str = "login";
pub const ADMIN: &str = "admin";

const PAGES: [(&str, &str); 4] = [
    (HOME, include_str!("../../templates/home.hbs")),
    (CATEGORY, include_str!("../../templates/category.hbs")),
    (LOGIN, include_str!("../../templates/login.hbs")),
    (ADMIN, include_str!("../../templates/admin.hbs")),
];

const PARTIALS: [(&str, &str); 5] = [
    ("head", include_str!("../../templates/partials/head.hbs")),
    ("header", include_str!("../../templates/partials/header.hbs")),
    ("modals", include_str!("../../templates/partials/modals.hbs")),
    ("footer", include_str!("../../templates/partials/footer.hbs")),
    ("variants_button", include_str!("../../templates/partials/variants_button.hbs")),
];

/// Shared template registry. All `{{value}}` output is HTML-escaped.
#[derive(Clone)]
pub struct Renderer {
    registry: Arc<Handlebars<'static>>,
}

impl Renderer {
    pub fn new() -> Result<Self, ApiError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);

        for (name, source) in PARTIALS {
            registry
                .register_partial(name, source)
                .map_err(|e| ApiError::TemplateError(format!("partial {name}: {e}")))?;
        }
        for (name, source) in PAGES {
            registry
                .register_template_string(name, source)
                .map_err(|e| ApiError::TemplateError(format!("template {name}: {e}")))?;
        }

        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, ApiError> {
        Ok(self.registry.render(template, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::views::{CategoryView, HomeView, LoginView};
    use super::*;
    use menu_core::services::{CategoryPage, HomePage};
    use menu_core::{Category, Layout, MenuItem, SiteConfig};
    use menu_shared::config::SiteSettings;

    fn site() -> SiteSettings {
        SiteSettings {
            lang: "tr".into(),
            description_max_chars: 300,
        }
    }

    fn soup() -> MenuItem {
        MenuItem {
            id: "m1".into(),
            name: "Mercimek <Acılı>".into(),
            price: "120".into(),
            image: "uploads/u_1.jpg".into(),
            category_id: "c1".into(),
            favorite: true,
            description: "Limon & kıtır ekmek".into(),
            variants: Vec::new(),
        }
    }

    #[test]
    fn test_home_escapes_store_text() {
        let renderer = Renderer::new().unwrap();
        let page = HomePage {
            config: SiteConfig::default(),
            favorites: vec![soup()],
            categories: vec![Category::new("Çorbalar".into(), None, Layout::Full)],
            searchable_items: vec![soup()],
        };

        let html = renderer.render(HOME, &HomeView::build(&page, &site()).unwrap()).unwrap();

        assert!(html.contains("<html lang=\"tr\">"));
        assert!(html.contains("Mercimek &lt;Acılı&gt;"));
        assert!(html.contains("href=\"category?id=c1#item-m1\""));
        assert!(html.contains("120 ₺"));
        assert!(html.contains("cat-card full"));
        assert!(html.contains("window.__SEARCH__ = {"));
    }

    #[test]
    fn test_category_page_lists_items() {
        let renderer = Renderer::new().unwrap();
        let page = CategoryPage {
            config: SiteConfig::default(),
            category: Category::new("Çorbalar".into(), None, Layout::Two),
            items: vec![soup()],
        };

        let html = renderer.render(CATEGORY, &CategoryView::build(&page, &site()).unwrap()).unwrap();

        assert!(html.contains("<title>Çorbalar - Menü</title>"));
        assert!(html.contains("id=\"item-m1\""));
        assert!(html.contains("Limon &amp; kıtır ekmek"));
    }

    #[test]
    fn test_login_page_shows_error() {
        let renderer = Renderer::new().unwrap();
        let view = LoginView::new(&SiteConfig::default(), &site(), Some("Şifre girin"));

        let html = renderer.render(LOGIN, &view).unwrap();

        assert!(html.contains("value=\"set_admin_password\""));
        assert!(html.contains("Şifre girin"));
    }
}
