// Field-presence validation helpers
// Requests use Option<T> fields so an absent field is distinguishable from a
// legitimate zero or empty value; these helpers turn absence into a 400 that
// names the offending field.

use std::fmt;

/// A required request field was absent or blank
#[derive(Debug)]
pub struct MissingField {
    field: &'static str,
    blank: bool,
}

impl MissingField {
    fn absent(field: &'static str) -> Self {
        Self { field, blank: false }
    }

    fn blank(field: &'static str) -> Self {
        Self { field, blank: true }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.blank {
            write!(f, "Field '{}' must not be empty", self.field)
        } else {
            write!(f, "Field '{}' is required", self.field)
        }
    }
}

impl std::error::Error for MissingField {}

/// Require a field to be present. Zero is a present value.
pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T, MissingField> {
    value.ok_or_else(|| MissingField::absent(field))
}

/// Require a text field to be present and non-blank. The value is trimmed.
pub fn require_text(value: Option<String>, field: &'static str) -> Result<String, MissingField> {
    let value = value.ok_or_else(|| MissingField::absent(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MissingField::blank(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_accepts_zero() {
        // A stock count of zero is a present value, not a missing one.
        assert_eq!(require(Some(0), "count_in_stock").unwrap(), 0);
    }

    #[test]
    fn test_require_rejects_absent() {
        let err = require::<i32>(None, "count_in_stock").unwrap_err();
        assert_eq!(err.to_string(), "Field 'count_in_stock' is required");
    }

    #[test]
    fn test_require_text_trims() {
        let value = require_text(Some("  Espresso Maker  ".to_string()), "name").unwrap();
        assert_eq!(value, "Espresso Maker");
    }

    #[test]
    fn test_require_text_rejects_blank() {
        let err = require_text(Some("   ".to_string()), "name").unwrap_err();
        assert_eq!(err.to_string(), "Field 'name' must not be empty");
    }

    #[test]
    fn test_require_text_rejects_absent() {
        let err = require_text(None, "name").unwrap_err();
        assert_eq!(err.to_string(), "Field 'name' is required");
    }
}
