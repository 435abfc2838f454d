use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating buyer phone numbers
    /// Accepts an optional leading '+' followed by 7-15 digits, with
    /// spaces, dots or hyphens as separators
    /// - Valid: "+6281234567890", "0812-3456-7890", "081 234 5678"
    /// - Invalid: "abc", "12", "++62812"
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9][0-9 .\-]{5,18}[0-9]$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("+6281234567890"));
        assert!(PHONE_REGEX.is_match("0812-3456-7890"));
        assert!(PHONE_REGEX.is_match("081 234 5678"));
        assert!(PHONE_REGEX.is_match("+1 555.123.4567"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("abc"));
        assert!(!PHONE_REGEX.is_match("12"));
        assert!(!PHONE_REGEX.is_match("++62812345678"));
        assert!(!PHONE_REGEX.is_match("")); // empty
        assert!(!PHONE_REGEX.is_match("0812345678x")); // trailing letter
    }
}
