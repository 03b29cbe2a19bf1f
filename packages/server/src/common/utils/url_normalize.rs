use url::Url;

/// Canonicalize a URL for duplicate detection.
///
/// Rules:
/// - Lowercase scheme, host, and path
/// - Drop default ports (handled by the parser)
/// - Strip the trailing slash, except for the root path
/// - Drop query string and fragment
///
/// Invalid URLs fall back to a naive lowercase + trim-trailing-slash
/// normalization rather than failing the comparison outright.
pub fn normalize_url(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(mut url) => {
            let mut path = url.path().to_lowercase();
            if path.len() > 1 && path.ends_with('/') {
                path.pop();
            }
            url.set_path(&path);
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => {
            let lowered = raw.trim().to_lowercase();
            lowered.strip_suffix('/').unwrap_or(&lowered).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive() {
        assert_eq!(
            normalize_url("HTTP://Foo.com/Bar/"),
            normalize_url("http://foo.com/bar")
        );
    }

    #[test]
    fn query_and_fragment_ignored() {
        assert_eq!(
            normalize_url("http://foo.com/bar?x=1"),
            normalize_url("http://foo.com/bar")
        );
        assert_eq!(
            normalize_url("http://foo.com/bar#section"),
            normalize_url("http://foo.com/bar")
        );
    }

    #[test]
    fn trailing_slash_stripped_except_root() {
        assert_eq!(
            normalize_url("https://acme.ai/"),
            normalize_url("https://acme.ai")
        );
        assert_eq!(
            normalize_url("https://acme.ai/tools/"),
            normalize_url("https://acme.ai/tools")
        );
    }

    #[test]
    fn default_port_dropped() {
        assert_eq!(
            normalize_url("http://foo.com:80/bar"),
            normalize_url("http://foo.com/bar")
        );
    }

    #[test]
    fn idempotent() {
        let once = normalize_url("HTTP://Foo.com/Bar/?q=1#frag");
        assert_eq!(normalize_url(&once), once);
    }

    #[test]
    fn invalid_url_falls_back_to_naive_normalization() {
        assert_eq!(normalize_url("Not A Url/"), "not a url");
        assert_eq!(normalize_url("acme.ai/"), "acme.ai");
    }
}
