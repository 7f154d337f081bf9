//! Shared decoding for the tab-separated flat-file exports
//!
//! The ledger, account catalog and entity roster share one physical layout:
//! ISO-8859-1 text, newline-terminated records, tab-separated fields and
//! optional double quotes around values. These helpers implement that layout
//! once; each parser only decides which fields it needs.

use crate::constants::{FIELD_SEPARATOR, QUOTE_CHAR};

/// Decode ISO-8859-1 bytes; every byte maps to the code point of equal value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Iterate the non-blank lines of a decoded export
///
/// Splits on `\n` only, so a trailing `\r` stays on the line and is removed
/// later when fields are cleaned.
pub fn data_lines(content: &str) -> impl Iterator<Item = &str> {
    content.split('\n').filter(|line| !line.trim().is_empty())
}

/// Split a line into its raw tab-separated fields
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_SEPARATOR).collect()
}

/// Remove every quote character and surrounding whitespace
pub fn clean_field(raw: &str) -> String {
    raw.replace(QUOTE_CHAR, "").trim().to_string()
}

/// Raw field at `index` when present and not empty
///
/// Emptiness is judged on the raw text: a field holding only quotes counts
/// as present, matching how the exports are validated upstream.
pub fn required_field<'a>(fields: &[&'a str], index: usize) -> Option<&'a str> {
    fields.get(index).copied().filter(|field| !field.is_empty())
}

/// Parse the leading integer of a field
///
/// Quotes and surrounding whitespace are ignored, an optional sign is
/// accepted and anything after the digits is ignored (`"12.5"` reads as 12).
/// Returns `None` when no digit follows the sign.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let cleaned = clean_field(raw);
    let (negative, digits) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, cleaned.as_str()),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse a leading integer that must be non-negative and fit in `T`
pub fn parse_identifier<T: TryFrom<i64>>(raw: &str) -> Option<T> {
    parse_leading_int(raw)
        .filter(|value| *value >= 0)
        .and_then(|value| T::try_from(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_latin1_maps_high_bytes() {
        let bytes = [b'C', 0xE9, b'd', b'u', b'l', b'a', b' ', 0xD1];
        assert_eq!(decode_latin1(&bytes), "Cédula Ñ");
    }

    #[test]
    fn test_data_lines_drops_blank_lines() {
        let content = "a\tb\n\n   \r\nc\td\r\n";
        let lines: Vec<&str> = data_lines(content).collect();
        assert_eq!(lines, vec!["a\tb", "c\td\r"]);
    }

    #[test]
    fn test_clean_field_strips_quotes_and_whitespace() {
        assert_eq!(clean_field("\"Caja de Ahorro\" \r"), "Caja de Ahorro");
        assert_eq!(clean_field("\"\""), "");
    }

    #[test]
    fn test_required_field() {
        let fields = split_fields("1\t\t\"\"");
        assert_eq!(required_field(&fields, 0), Some("1"));
        assert_eq!(required_field(&fields, 1), None);
        assert_eq!(required_field(&fields, 2), Some("\"\""));
        assert_eq!(required_field(&fields, 3), None);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("\"00042\""), Some(42));
        assert_eq!(parse_leading_int(" -1500\r"), Some(-1500));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("12.9"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_parse_identifier_rejects_negative_and_overflow() {
        assert_eq!(parse_identifier::<u32>("15"), Some(15));
        assert_eq!(parse_identifier::<u32>("-15"), None);
        assert_eq!(parse_identifier::<u32>("99999999999"), None);
        assert_eq!(parse_identifier::<u64>("99999999999"), Some(99_999_999_999));
    }
}
