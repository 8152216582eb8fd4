//! Field-level CSV encoding
//!
//! Two conventions live here:
//!
//! - RFC 4180 quoting for individual field values ([`encode_field`] /
//!   [`decode_field`]). Values containing the delimiter, a quote or a
//!   newline are wrapped in double quotes with embedded quotes
//!   doubled, so multi-line fields survive as one logical record.
//! - The legacy pipe convention for step instructions
//!   ([`newlines_to_pipes`] / [`pipes_to_newlines`]): steps are stored
//!   internally as newline-separated text but travel as a single
//!   physical line with `|` separators in the localized sheet format.

/// The field delimiter for both CSV schemas
pub const DELIMITER: char = ',';

/// Encode one field value, quoting per RFC 4180 when needed
pub fn encode_field(value: &str) -> String {
    if value.contains(DELIMITER)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Decode one raw token: strip a single surrounding quote pair if
/// present and undouble embedded quotes. Exact inverse of
/// [`encode_field`].
pub fn decode_field(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].replace("\"\"", "\"")
    } else {
        raw.to_string()
    }
}

/// Replace internal newlines with `|` so multi-step instructions fit
/// on one physical line in the localized sheet format.
///
/// Not safe for text that itself contains a literal `|`: the round
/// trip through [`pipes_to_newlines`] turns it into a newline. This is
/// a known limitation of the sheet format, not silent corruption.
pub fn newlines_to_pipes(text: &str) -> String {
    text.replace("\r\n", "|").replace('\n', "|")
}

/// Inverse of [`newlines_to_pipes`]
pub fn pipes_to_newlines(text: &str) -> String {
    text.replace('|', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_plain_value_untouched() {
        assert_eq!(encode_field("simple"), "simple");
        assert_eq!(encode_field(""), "");
    }

    #[test]
    fn test_encode_quotes_special_characters() {
        assert_eq!(encode_field("with,comma"), "\"with,comma\"");
        assert_eq!(encode_field("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(encode_field("with\nnewline"), "\"with\nnewline\"");
    }

    #[test]
    fn test_decode_inverts_encode() {
        for value in [
            "simple",
            "",
            "with,comma",
            "with\"quote",
            "say \"hi\", then stop",
            "line one\nline two",
            "\"already quoted\"",
        ] {
            assert_eq!(decode_field(&encode_field(value)), value, "value: {value:?}");
        }
    }

    #[test]
    fn test_decode_unquoted_passthrough() {
        assert_eq!(decode_field("plain"), "plain");
        // a lone quote is not a surrounding pair
        assert_eq!(decode_field("\""), "\"");
    }

    #[test]
    fn test_pipe_conversion_inverse() {
        let steps = "1. Open the app\n2. Tap login\n3. Enter credentials";
        let encoded = newlines_to_pipes(steps);
        assert_eq!(encoded, "1. Open the app|2. Tap login|3. Enter credentials");
        assert_eq!(pipes_to_newlines(&encoded), steps);
    }

    #[test]
    fn test_pipe_conversion_handles_crlf() {
        assert_eq!(newlines_to_pipes("a\r\nb\nc"), "a|b|c");
    }

    #[test]
    fn test_pipe_limitation_documented() {
        // a literal pipe in the source text becomes a newline after a
        // round trip; callers get this exact behavior, not corruption
        let text = "use the a|b toggle";
        let round_tripped = pipes_to_newlines(&newlines_to_pipes(text));
        assert_eq!(round_tripped, "use the a\nb toggle");
    }
}
