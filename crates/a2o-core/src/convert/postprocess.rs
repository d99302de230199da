/// Final textual touch-ups over the serialized document.
///
/// These are whole-document substring substitutions, not schema-scoped
/// rewrites: any `"type":"date"` anywhere in the serialized text is
/// rewritten, regardless of nesting depth or key name.
pub fn normalize_output(serialized: &str) -> String {
    serialized
        .replace(",\"required\":[]", "")
        .replace(
            "\"type\":\"date\"",
            "\"type\":\"string\",\"format\":\"date-time\"",
        )
        .replace(
            "\"type\":\"file\"",
            "\"type\":\"string\",\"format\":\"binary\"",
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_empty_required_lists() {
        let input = r#"{"type":"object","properties":{},"required":[]}"#;
        assert_eq!(normalize_output(input), r#"{"type":"object","properties":{}}"#);
    }

    #[test]
    fn rewrites_date_type_at_any_depth() {
        let input = r#"{"a":{"b":{"c":{"type":"date"}}}}"#;
        assert_eq!(
            normalize_output(input),
            r#"{"a":{"b":{"c":{"type":"string","format":"date-time"}}}}"#
        );
    }

    #[test]
    fn rewrites_file_type() {
        let input = r#"{"upload":{"type":"file"}}"#;
        assert_eq!(
            normalize_output(input),
            r#"{"upload":{"type":"string","format":"binary"}}"#
        );
    }

    #[test]
    fn populated_required_untouched() {
        let input = r#"{"required":["id"],"type":"string"}"#;
        assert_eq!(normalize_output(input), input);
    }
}
