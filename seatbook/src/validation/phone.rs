//! Phone number normalization.

/// Strips every non-digit character from a phone number.
///
/// # Examples
///
/// ```
/// use seatbook::validation::normalize_phone;
///
/// assert_eq!(normalize_phone("(555) 123-4567"), "5551234567");
/// assert_eq!(normalize_phone("+1 555.123"), "1555123");
/// assert_eq!(normalize_phone("call me"), "");
/// ```
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_normalized() {
        assert_eq!(normalize_phone("5551234567"), "5551234567");
    }

    #[test]
    fn test_non_ascii_digits_are_dropped() {
        assert_eq!(normalize_phone("٥٥٥-12"), "12");
    }
}
