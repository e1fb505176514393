//! Price display normalisation

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

pub const CURRENCY_SUFFIX: &str = "₺";

static CURRENCY_MARKER: Lazy<Option<Regex>> = Lazy::new(|| match Regex::new(r"(?i)\s*(₺|tl)\s*") {
    Ok(re) => Some(re),
    Err(e) => {
        warn!("Currency marker pattern failed to compile: {}", e);
        None
    }
});

/// Formats a free-text price for display.
///
/// Any existing lira marker (`₺` or `TL`, any case) is stripped together with
/// its surrounding whitespace and a single ` ₺` suffix is appended. A blank
/// price stays blank.
pub fn format_price(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let bare = match CURRENCY_MARKER.as_ref() {
        Some(re) => re.replace_all(trimmed, "").into_owned(),
        None => trimmed.to_string(),
    };
    format!("{} {}", bare.trim(), CURRENCY_SUFFIX)
}
