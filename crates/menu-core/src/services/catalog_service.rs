//! Public catalog queries

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Category, MenuItem, SiteConfig};
use crate::repositories::SiteRepository;

/// Everything the home page shows.
#[derive(Debug, Clone)]
pub struct HomePage {
    pub config: SiteConfig,
    /// Favourite items in store order.
    pub favorites: Vec<MenuItem>,
    /// Visible categories in store order.
    pub categories: Vec<Category>,
    /// Items of visible categories, for the client-side search index.
    pub searchable_items: Vec<MenuItem>,
}

#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub config: SiteConfig,
    pub category: Category,
    /// Items of this category in store order.
    pub items: Vec<MenuItem>,
}

pub struct CatalogService<R: SiteRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: SiteRepository + ?Sized> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn site_config(&self) -> SiteConfig {
        self.repo.load_config().await
    }

    pub async fn home(&self) -> HomePage {
        let config = self.repo.load_config().await;
        let categories: Vec<Category> = self
            .repo
            .load_categories()
            .await
            .into_iter()
            .filter(|c| c.visible)
            .collect();
        let menu = self.repo.load_menu().await;

        let favorites = menu.iter().filter(|item| item.favorite).cloned().collect();
        let searchable_items = menu
            .into_iter()
            .filter(|item| categories.iter().any(|c| item.belongs_to(&c.id)))
            .collect();

        HomePage {
            config,
            favorites,
            categories,
            searchable_items,
        }
    }

    /// `None` when no category has this id.
    pub async fn category(&self, id: &str) -> Option<CategoryPage> {
        let category = self
            .repo
            .load_categories()
            .await
            .into_iter()
            .find(|c| c.id == id);
        let Some(category) = category else {
            debug!("Category {} not found", id);
            return None;
        };

        let items = self
            .repo
            .load_menu()
            .await
            .into_iter()
            .filter(|item| item.belongs_to(&category.id))
            .collect();
        let config = self.repo.load_config().await;

        Some(CategoryPage {
            config,
            category,
            items,
        })
    }
}
