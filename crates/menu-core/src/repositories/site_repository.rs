//! Site document repository trait (port)

use async_trait::async_trait;

use crate::domain::{Category, MenuItem, SiteConfig};
use crate::error::DomainError;

/// The three persisted documents.
///
/// Loads never fail: a missing, unreadable or malformed document yields its
/// default and the problem is only logged. Saves replace the whole document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn load_config(&self) -> SiteConfig;
    async fn save_config(&self, config: &SiteConfig) -> Result<(), DomainError>;
    async fn load_categories(&self) -> Vec<Category>;
    async fn save_categories(&self, categories: &[Category]) -> Result<(), DomainError>;
    async fn load_menu(&self) -> Vec<MenuItem>;
    async fn save_menu(&self, items: &[MenuItem]) -> Result<(), DomainError>;
}
