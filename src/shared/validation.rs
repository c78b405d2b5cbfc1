use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for folder colors
    /// - Valid: "#135bec", "#FFFFFF"
    /// - Invalid: "135bec", "#fff", "#12345g"
    pub static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// Trim a user-supplied name, returning None when nothing is left
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
