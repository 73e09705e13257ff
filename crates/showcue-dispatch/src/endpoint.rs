//! Endpoint resolution and request-target construction.
//!
//! The remote API takes its arguments in the query string of a POST:
//! `?action=<identifier>&data=<json>`, form-urlencoded.

use showcue_core::config::DEFAULT_ENDPOINT;
use url::Url;

use crate::error::DispatchError;

/// Apply the endpoint defaults: empty means [`DEFAULT_ENDPOINT`], and a
/// value without a scheme gets `http://`.
pub fn normalize_endpoint(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_ENDPOINT.to_string();
    }
    // Only the part before any path, query or fragment can hold a scheme.
    let head_end = trimmed.find(['/', '?', '#']).unwrap_or(trimmed.len());
    if trimmed[..head_end].ends_with(':') && trimmed[head_end..].starts_with("//") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Parse an already-normalized base URL. Only http and https are accepted.
pub fn parse_base(normalized: &str) -> Result<Url, DispatchError> {
    let url = Url::parse(normalized).map_err(|e| {
        DispatchError::Configuration(format!("invalid endpoint '{}': {}", normalized, e))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(DispatchError::Configuration(format!(
            "unsupported endpoint scheme '{}' in '{}'",
            scheme, normalized
        ))),
    }
}

/// Normalize and parse a configured endpoint.
pub fn resolve_base(raw: &str) -> Result<Url, DispatchError> {
    parse_base(&normalize_endpoint(raw))
}

/// Set `action` and `data` on `base`, replacing any existing values and
/// keeping every other query pair.
pub fn build_target(base: &Url, action: &str, label: &str) -> Url {
    let data = serde_json::json!({ "value": label.trim() }).to_string();

    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k != "action" && k != "data")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut target = base.clone();
    {
        let mut pairs = target.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair("action", action);
        pairs.append_pair("data", &data);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty_uses_default() {
        assert_eq!(normalize_endpoint(""), "http://localhost:5505/");
        assert_eq!(normalize_endpoint("   "), "http://localhost:5505/");
    }

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(normalize_endpoint("example.com:5505"), "http://example.com:5505");
        assert_eq!(normalize_endpoint(" 10.0.0.5:5505/api "), "http://10.0.0.5:5505/api");
    }

    #[test]
    fn test_normalize_ignores_scheme_in_path_or_query() {
        assert_eq!(
            normalize_endpoint("stage.local:5505/?next=http://x"),
            "http://stage.local:5505/?next=http://x"
        );
        assert_eq!(
            normalize_endpoint("stage.local/redirect/http://x"),
            "http://stage.local/redirect/http://x"
        );
        let base = resolve_base("stage.local:5505/?next=http://x").unwrap();
        assert_eq!(base.host_str(), Some("stage.local"));
        assert_eq!(base.port(), Some(5505));
    }

    #[test]
    fn test_normalize_keeps_scheme() {
        assert_eq!(normalize_endpoint("https://stage.local"), "https://stage.local");
        assert_eq!(normalize_endpoint("http://localhost:5505/"), "http://localhost:5505/");
    }

    #[test]
    fn test_default_slide_target() {
        let base = resolve_base("").unwrap();
        let target = build_target(&base, "name_select_slide", "Intro");
        assert_eq!(
            target.as_str(),
            "http://localhost:5505/?action=name_select_slide&data=%7B%22value%22%3A%22Intro%22%7D"
        );
    }

    #[test]
    fn test_schemeless_endpoint_target() {
        let base = resolve_base("example.com:5505").unwrap();
        assert_eq!(base.host_str(), Some("example.com"));
        assert_eq!(base.port(), Some(5505));
        let target = build_target(&base, "name_select_show", "Sunday");
        assert!(target
            .as_str()
            .starts_with("http://example.com:5505/?action=name_select_show&data="));
    }

    #[test]
    fn test_label_is_trimmed_and_encoded() {
        let base = resolve_base("").unwrap();
        let target = build_target(&base, "name_select_show", "  Tom & \"Jerry\"  ");
        let data = target
            .query_pairs()
            .find(|(k, _)| k == "data")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(data, r#"{"value":"Tom & \"Jerry\""}"#);
        assert!(target.as_str().contains("%26"));
        assert!(!target.as_str().contains(" "));
    }

    #[test]
    fn test_existing_query_pairs_kept_and_replaced() {
        let base = resolve_base("http://host:5505/api?token=abc&action=old&data=old").unwrap();
        let target = build_target(&base, "name_select_slide", "New");
        let pairs: Vec<(String, String)> = target
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("token".to_string(), "abc".to_string()),
                ("action".to_string(), "name_select_slide".to_string()),
                ("data".to_string(), r#"{"value":"New"}"#.to_string()),
            ]
        );
        assert_eq!(target.path(), "/api");
    }

    #[test]
    fn test_unparseable_endpoint_is_configuration_error() {
        let err = resolve_base("exa mple.com").unwrap_err();
        assert!(matches!(err, DispatchError::Configuration(_)));

        let err = resolve_base("http://[::1").unwrap_err();
        assert!(matches!(err, DispatchError::Configuration(_)));
    }

    #[test]
    fn test_empty_base_without_default_is_configuration_error() {
        let err = parse_base("").unwrap_err();
        assert!(matches!(err, DispatchError::Configuration(_)));

        let err = parse_base("http://").unwrap_err();
        assert!(matches!(err, DispatchError::Configuration(_)));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = resolve_base("ftp://files.example.com").unwrap_err();
        assert!(matches!(err, DispatchError::Configuration(_)));
        assert!(err.to_string().contains("ftp"));
    }
}
