//! # Menu Infrastructure
//!
//! Filesystem implementations (adapters) of the menu-core ports: the JSON
//! document store, upload storage and the rendered home page cache.

pub mod cache;
pub mod storage;

pub use cache::FilePageCache;
pub use storage::{DiskUploadStorage, JsonSiteRepository};
