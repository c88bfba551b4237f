use std::sync::LazyLock;

use regex::Regex;

use super::{first_match, Strategy};
use crate::record::Field;

// ASCII digits only. The trailing `(?:[^0-9]|$)` keeps a 15+ digit run from matching
// on its first 14 digits.
static STRICT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i:"ean")\s*[:=]\s*"?([0-9]{12,14})(?:[^0-9]|$)"#).unwrap()
});
static LOOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:ean)[^0-9]*([0-9]{12,14})(?:[^0-9]|$)").unwrap());

const STRATEGIES: &[Strategy<str>] = &[("json_key", json_key), ("near_keyword", near_keyword)];

/// EAN from raw page text, preferring a quoted `"ean"` key over a bare mention.
pub fn extract(text: &str) -> Field {
    first_match("barcode", STRATEGIES, text)
}

/// `"ean": "7891234567890"` or `"EAN"=7891234567890` style key/value pairs.
pub fn json_key(text: &str) -> Option<String> {
    capture(&STRICT_RE, text)
}

/// Any `ean` followed, after non-digits, by a 12-14 digit run.
pub fn near_keyword(text: &str) -> Option<String> {
    capture(&LOOSE_RE, text)
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(s: &str) -> Field {
        Field::Found(s.to_string())
    }

    #[test]
    fn quoted_json_key() {
        assert_eq!(extract(r#"{"sku":"1","ean": "7891234567890"}"#), found("7891234567890"));
    }

    #[test]
    fn key_is_case_insensitive_and_accepts_equals() {
        assert_eq!(json_key(r#"data "EAN"=78912345678901;"#), Some("78912345678901".into()));
    }

    #[test]
    fn loose_separator() {
        assert_eq!(extract("Código EAN - 789123456789 disponível"), found("789123456789"));
    }

    #[test]
    fn strict_pattern_is_preferred_over_earlier_loose_mention() {
        let text = r#"EAN 111111111111 ... {"ean":"7891234567890"}"#;
        assert_eq!(extract(text), found("7891234567890"));
    }

    #[test]
    fn first_strict_match_in_document_order() {
        let text = r#"{"ean":"7890000000001"} {"ean":"7890000000002"}"#;
        assert_eq!(extract(text), found("7890000000001"));
    }

    #[test]
    fn fifteen_digits_do_not_match() {
        assert_eq!(extract(r#""ean": "789123456789012""#), Field::NotFound);
        assert_eq!(extract("EAN: 789123456789012 end"), Field::NotFound);
    }

    #[test]
    fn eleven_digits_do_not_match() {
        assert_eq!(extract(r#""ean": "78912345678""#), Field::NotFound);
        assert_eq!(extract("ean 78912345678"), Field::NotFound);
    }

    #[test]
    fn digits_at_end_of_input() {
        assert_eq!(extract("EAN:7891234567890"), found("7891234567890"));
    }

    #[test]
    fn non_ascii_digits_are_not_a_barcode() {
        // Arabic-Indic and fullwidth digits.
        assert_eq!(extract(r#""ean": "٧٨٩١٢٣٤٥٦٧٨٩٠""#), Field::NotFound);
        assert_eq!(extract("EAN ７８９１２３４５６７８９０"), Field::NotFound);
    }

    #[test]
    fn no_keyword_no_match() {
        assert_eq!(extract("SKU 7891234567890"), Field::NotFound);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = r#"<script>{"Ean":"7898962350421"}</script>"#;
        assert_eq!(extract(text), extract(text));
    }
}
