//! Cleaning of caller supplied search text

/// Remove every single and double quote character from `raw`
///
/// Hosts tend to wrap free text in quotes; Hudu treats them literally and
/// returns nothing, so they must never reach the `search` parameter.
pub fn sanitize_query(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '"' | '\'')).collect()
}

/// True when the text has nothing left to search for
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_query_strips_double_quotes() {
        assert_eq!(sanitize_query("\"Emily\""), "Emily");
    }

    #[test]
    fn test_sanitize_query_strips_single_quotes_anywhere() {
        assert_eq!(sanitize_query("O'Brien 'laptop'"), "OBrien laptop");
    }

    #[test]
    fn test_sanitize_query_keeps_other_characters() {
        assert_eq!(sanitize_query("ACAC-S33381 / room 7"), "ACAC-S33381 / room 7");
        assert_eq!(sanitize_query("José • Ñandú"), "José • Ñandú");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(is_blank(&sanitize_query("\"\"")));
        assert!(is_blank(&sanitize_query(" ' ' ")));
        assert!(!is_blank("Emily"));
    }
}
