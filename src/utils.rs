use serde_json::Value;

/// Decodes HTML entities (`&amp;`, `&quot;`, `&#39;`, ...) into literal text.
///
/// Decoding never fails: unknown entities pass through unchanged, and text
/// that is already decoded survives another pass untouched.
pub fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Parses a `"M:SS"` or `"H:MM:SS"` duration token into seconds.
pub fn parse_duration(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.split(':').collect();
    let num = |s: &str| s.trim().parse::<u32>().ok();
    match parts.as_slice() {
        [m, s] => Some((num(m)? as u64 * 60 + num(s)? as u64) as f64),
        [h, m, s] => Some((num(h)? as u64 * 3600 + num(m)? as u64 * 60 + num(s)? as u64) as f64),
        _ => None,
    }
}

/// Loose-JSON truthiness: null, false, zero and empty strings,
/// arrays and objects all count as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_html_entities() {
        assert_eq!(decode_html_entities("Song &amp; Dance"), "Song & Dance");
        assert_eq!(decode_html_entities("Artist &quot;Name&quot;"), "Artist \"Name\"");
        assert_eq!(decode_html_entities("Don&#39;t Stop"), "Don't Stop");
        assert_eq!(decode_html_entities("AC&#x2F;DC"), "AC/DC");
        assert_eq!(decode_html_entities("&lt;3 &gt;:("), "<3 >:(");
    }

    #[test]
    fn test_decode_html_entities_idempotent() {
        let decoded = decode_html_entities("Song &amp; Dance");
        assert_eq!(decode_html_entities(&decoded), decoded);
    }

    #[test]
    fn test_decode_html_entities_passthrough() {
        assert_eq!(decode_html_entities("plain title"), "plain title");
        assert_eq!(decode_html_entities("half &baked"), "half &baked");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("3:45"), Some(225.0));
        assert_eq!(parse_duration("1:02:03"), Some(3723.0));
        assert_eq!(parse_duration("0:30"), Some(30.0));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("345"), None);
        assert_eq!(parse_duration("a:bc"), None);
        assert_eq!(parse_duration("1:2:3:4"), None);
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!([0])));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(!is_truthy(&json!(0)));
    }
}
