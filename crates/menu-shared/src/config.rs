//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageSettings,
    pub session: SessionSettings,
    pub site: SiteSettings,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Filesystem locations. Relative paths resolve against the working directory.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub static_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_seconds: i64,
    pub secure_cookie: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteSettings {
    /// Value of the `<html lang>` attribute on public pages.
    pub lang: String,
    pub description_max_chars: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }

    /// Builder pre-populated with every default, without any file or env source.
    pub fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "menu-server")?
            .set_default("storage.data_dir", "data")?
            .set_default("storage.uploads_dir", "uploads")?
            .set_default("storage.cache_dir", "cache")?
            .set_default("storage.static_dir", "static")?
            .set_default("session.cookie_name", "menu_admin")?
            .set_default("session.ttl_seconds", 8 * 3600)?
            .set_default("session.secure_cookie", false)?
            .set_default("site.lang", "tr")?
            .set_default("site.description_max_chars", 300)?
            .set_default("upload.max_body_bytes", 32 * 1024 * 1024)?
            .set_default("logging.format", "pretty")
    }
}
