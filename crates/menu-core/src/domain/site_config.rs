//! Site configuration (singleton document)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{lenient_record, lenient_string, record_from_value};

pub const DEFAULT_SITE_TITLE: &str = "Menü";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    #[serde(deserialize_with = "lenient_string")]
    pub facebook: String,
    #[serde(deserialize_with = "lenient_string")]
    pub instagram: String,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter: String,
}

/// Everything the admin console can configure about the site, plus the
/// admin credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    #[serde(deserialize_with = "lenient_string")]
    pub site_title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub logo: String,
    #[serde(deserialize_with = "lenient_string")]
    pub favicon: String,
    #[serde(deserialize_with = "lenient_record")]
    pub social: SocialLinks,
    #[serde(deserialize_with = "lenient_string")]
    pub wifi_password: String,
    #[serde(deserialize_with = "lenient_string")]
    pub header_bg: String,
    #[serde(deserialize_with = "lenient_string")]
    pub footer_bg: String,
    #[serde(deserialize_with = "lenient_string")]
    pub admin_password_hash: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: DEFAULT_SITE_TITLE.to_string(),
            logo: String::new(),
            favicon: String::new(),
            social: SocialLinks::default(),
            wifi_password: String::new(),
            header_bg: String::new(),
            footer_bg: String::new(),
            admin_password_hash: String::new(),
        }
    }
}

impl SiteConfig {
    /// Parses a loaded document; `None` when it is not a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        record_from_value(value)
    }

    pub fn has_admin_password(&self) -> bool {
        !self.admin_password_hash.is_empty()
    }

    /// Title shown in headers, falling back to the default for a blank title.
    pub fn display_title(&self) -> &str {
        if self.site_title.trim().is_empty() {
            DEFAULT_SITE_TITLE
        } else {
            &self.site_title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = SiteConfig::from_value(json!({"logo": "uploads/logo.png"})).unwrap();
        assert_eq!(config.site_title, DEFAULT_SITE_TITLE);
        assert_eq!(config.logo, "uploads/logo.png");
        assert!(!config.has_admin_password());
    }

    #[test]
    fn test_malformed_social_falls_back() {
        let config = SiteConfig::from_value(json!({"social": "nope", "wifi_password": 12345678})).unwrap();
        assert_eq!(config.social, SocialLinks::default());
        assert_eq!(config.wifi_password, "12345678");
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(SiteConfig::from_value(json!([1, 2])).is_none());
        assert!(SiteConfig::from_value(json!("config")).is_none());
    }
}
