use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENTIFIER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z_]+").unwrap());

/// Map an arbitrary field or table name to an identifier-safe key.
///
/// Every maximal run of characters outside `[0-9a-zA-Z_]` becomes a single
/// `_`, then the result is lowercased.
pub fn normalize_field_name(name: &str) -> String {
    NON_IDENTIFIER_RUN.replace_all(name, "_").to_lowercase()
}
