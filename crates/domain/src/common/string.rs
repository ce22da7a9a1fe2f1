//! String normalisation helpers.

/// Returns the trimmed input, or `None` if nothing but whitespace remains.
///
/// # Examples
///
/// ```
/// use talekeeper_domain::common::non_blank;
///
/// assert_eq!(non_blank("  open door "), Some("open door"));
/// assert_eq!(non_blank("   "), None);
/// ```
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Converts a blank optional string to `None`.
///
/// The server sends `null` or `""` interchangeably for unset text fields.
pub fn some_if_not_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_strings_collapse_to_none() {
        assert_eq!(some_if_not_blank(Some(String::new())), None);
        assert_eq!(some_if_not_blank(Some("  ".into())), None);
        assert_eq!(some_if_not_blank(None), None);
        assert_eq!(
            some_if_not_blank(Some("A tale".into())),
            Some("A tale".to_string())
        );
    }
}
