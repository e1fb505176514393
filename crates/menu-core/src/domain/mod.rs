//! # Menu Core - Domain Module
//!
//! Records persisted in the site's JSON documents.

pub mod category;
pub mod coerce;
pub mod menu_item;
pub mod site_config;
pub mod upload;

pub use category::{Category, Layout};
pub use menu_item::{MenuItem, MenuVariant, NewMenuItem};
pub use site_config::{SiteConfig, SocialLinks};
pub use upload::UploadedFile;

use uuid::Uuid;

/// Opaque record id: a one-letter collection prefix followed by a random token.
pub fn new_id(prefix: char) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}
