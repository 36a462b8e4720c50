//! Probe target resolution.

use url::Url;

use crate::probe::error::ProbeError;

/// Turn the raw `target` parameter into an absolute URL.
///
/// A target without a scheme is assumed to be `https`; an explicit `http` or
/// `https` scheme is kept. Other schemes and raw control characters are
/// rejected.
pub fn resolve(raw: &str) -> Result<Url, ProbeError> {
    if raw.trim().is_empty() {
        return Err(ProbeError::MissingTarget);
    }

    if raw.chars().any(char::is_control) {
        return Err(ProbeError::InvalidTarget(format!(
            "invalid control character in URL {:?}",
            raw
        )));
    }

    let candidate = if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let url = Url::parse(&candidate).map_err(|e| ProbeError::InvalidTarget(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ProbeError::InvalidTarget(format!(
                "unsupported scheme '{}'",
                other
            )))
        }
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ProbeError::InvalidTarget("empty host".to_string()));
    }

    Ok(url)
}

/// True when `raw` starts with `<scheme>://`. A `://` that appears after a
/// path, query or fragment delimiter belongs to the rest of the URL.
fn has_scheme(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// URL actually fetched for a resolved target: targets that name only a host
/// get `summary_path` appended.
pub fn summary_url(target: &Url, summary_path: &str) -> Url {
    if target.path() == "/" && target.query().is_none() {
        let mut url = target.clone();
        url.set_path(summary_path);
        url
    } else {
        target.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scheme_defaults_to_https() {
        let url = resolve("www.githubstatus.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.as_str(), "https://www.githubstatus.com/");

        let url = resolve("status.example.com:8443/api/v2/summary.json").unwrap();
        assert_eq!(url.as_str(), "https://status.example.com:8443/api/v2/summary.json");

        let url = resolve("status.example.com/api/v2/summary.json?ref=https://x.io").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("status.example.com"));
        assert_eq!(url.path(), "/api/v2/summary.json");
        assert_eq!(url.query(), Some("ref=https://x.io"));
    }

    #[test]
    fn test_scheme_detection() {
        assert!(has_scheme("https://status.example.com"));
        assert!(has_scheme("HTTP://status.example.com"));
        assert!(has_scheme("ftp://status.example.com"));
        assert!(!has_scheme("status.example.com"));
        assert!(!has_scheme("status.example.com/?next=http://x.io"));
        assert!(!has_scheme("status.example.com#http://x.io"));
        assert!(!has_scheme("://status.example.com"));
        assert!(!has_scheme("1http://status.example.com"));
    }

    #[test]
    fn test_explicit_scheme_is_preserved() {
        let url = resolve("http://127.0.0.1:8080/summary.json").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/summary.json");

        assert_eq!(resolve("https://status.example.com").unwrap().scheme(), "https");
    }

    #[test]
    fn test_empty_target() {
        assert!(matches!(resolve(""), Err(ProbeError::MissingTarget)));
        assert!(matches!(resolve("   "), Err(ProbeError::MissingTarget)));
    }

    #[test]
    fn test_malformed_targets() {
        for raw in [
            "status.example.com/\u{7f}",
            "https://status.exa\u{1}mple.com",
            "status.example.com\n",
            "https://exa mple.com",
            "https://",
            "ftp://status.example.com",
            "https://status.example.com:99999",
        ] {
            assert!(
                matches!(resolve(raw), Err(ProbeError::InvalidTarget(_))),
                "target {:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_summary_url() {
        let bare = resolve("www.githubstatus.com").unwrap();
        assert_eq!(
            summary_url(&bare, "/api/v2/summary.json").as_str(),
            "https://www.githubstatus.com/api/v2/summary.json"
        );

        let explicit = resolve("https://status.example.com/custom.json").unwrap();
        assert_eq!(summary_url(&explicit, "/api/v2/summary.json"), explicit);

        let with_query = resolve("https://status.example.com/?format=json").unwrap();
        assert_eq!(summary_url(&with_query, "/api/v2/summary.json"), with_query);
    }
}
