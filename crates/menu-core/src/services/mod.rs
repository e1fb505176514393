//! Domain services (business logic)

pub mod admin_service;
pub mod auth_service;
pub mod catalog_service;

pub use admin_service::{AdminService, AdminSnapshot, CategoryEdit, ItemForm, NewCategory, SettingsUpdate};
pub use auth_service::{AuthService, PasswordChange, SetPasswordOutcome};
pub use catalog_service::{CatalogService, CategoryPage, HomePage};

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Serialises every read-modify-write cycle over the site documents.
///
/// Services that mutate the documents share one lock, so two admin
/// submissions can never interleave their load and save steps.
#[derive(Debug, Clone, Default)]
pub struct StoreLock(Arc<Mutex<()>>);

impl StoreLock {
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.0.lock().await
    }
}
