//! Repository traits (ports)

pub mod page_cache;
pub mod site_repository;
pub mod upload_storage;

pub use page_cache::{CacheLookup, PageCache};
pub use site_repository::SiteRepository;
pub use upload_storage::UploadStorage;

#[cfg(test)]
pub use site_repository::MockSiteRepository;
