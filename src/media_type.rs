//! @ai:module:intent Map accept/produce directive tokens to MIME types
//! @ai:module:layer domain
//! @ai:module:public_api parse_media_types, lookup
//! @ai:module:stateless true

const MEDIA_TYPES: &[(&str, &str, &str)] = &[
    ("json", "application/json", "application/json"),
    ("xml", "text/xml", "text/xml"),
    ("plain", "text/plain", "text/plain"),
    ("html", "text/html", "text/html"),
    ("mpfd", "multipart/form-data", "multipart/form-data"),
];

/// @ai:intent Resolve a short alias or full MIME name to its canonical MIME type
/// @ai:example ("json") -> Some("application/json")
/// @ai:example ("text/xml") -> Some("text/xml")
/// @ai:example ("yaml") -> None
/// @ai:effects pure
pub fn lookup(token: &str) -> Option<&'static str> {
    MEDIA_TYPES
        .iter()
        .find(|(alias, full, _)| token == *alias || token == *full)
        .map(|(_, _, mime)| *mime)
}

/// @ai:intent Parse a comma-separated media type list
/// @ai:post unknown tokens are dropped, order and duplicates of known ones are kept
/// @ai:effects pure
pub fn parse_media_types(text: &str) -> Vec<String> {
    text.split(',')
        .filter_map(|token| lookup(token.trim()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_unknown_and_keeps_order() {
        assert_eq!(
            parse_media_types("json,xml,bogus,html"),
            vec!["application/json", "text/xml", "text/html"]
        );
    }

    #[test]
    fn test_keeps_duplicates() {
        assert_eq!(
            parse_media_types("json,application/json"),
            vec!["application/json", "application/json"]
        );
    }

    #[test]
    fn test_tolerates_spaces() {
        assert_eq!(
            parse_media_types("mpfd, plain"),
            vec!["multipart/form-data", "text/plain"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_media_types("").is_empty());
    }
}
