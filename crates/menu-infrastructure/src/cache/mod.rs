//! Cache module (rendered page cache on disk)

pub mod file_page_cache;

pub use file_page_cache::FilePageCache;
