//! Application-wide constants

pub const DEFAULT_LOG_FILTER: &str = "info,menu_api=debug,menu_core=debug";
pub const LOG_FILE_PREFIX: &str = "menu-server.log";

pub const CONFIG_FILE: &str = "config.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const MENU_FILE: &str = "menu.json";
pub const HOME_CACHE_FILE: &str = "home.html";

/// Prefix stored in records for uploaded files; also the URL path they are served under.
pub const UPLOADS_PREFIX: &str = "uploads";
