//! Storage module (JSON documents and uploads on disk)

pub mod json_store;
pub mod site_repo_impl;
pub mod upload_storage_impl;

pub use site_repo_impl::JsonSiteRepository;
pub use upload_storage_impl::DiskUploadStorage;
