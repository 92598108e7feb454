//! Anti-Forgery Token
//!
//! Resolved once per page load from the hidden form input or the token cookie.

use percent_encoding::percent_decode_str;

pub const DEFAULT_COOKIE: &str = "csrftoken";
pub const DEFAULT_HEADER: &str = "X-CSRFToken";

/// Token plus the header it travels in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    header: String,
    value: Option<String>,
}

impl CsrfToken {
    pub fn new(header: impl Into<String>, value: Option<String>) -> Self {
        Self {
            header: header.into(),
            value: value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
        }
    }

    /// Prefer the value of a rendered `csrfmiddlewaretoken` input, else the cookie
    pub fn resolve(header: &str, form_value: Option<String>, cookies: &str, cookie_name: &str) -> Self {
        let from_form = Self::new(header, form_value);
        if from_form.value.is_some() {
            return from_form;
        }
        Self::new(header, token_from_cookies(cookies, cookie_name))
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Header pair to attach, if a token was found
    pub fn header(&self) -> Option<(&str, &str)> {
        self.value.as_deref().map(|value| (self.header.as_str(), value))
    }
}

/// First `name=value` pair of a `document.cookie` string, percent-decoded
pub fn token_from_cookies(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_lookup() {
        let cookies = "sessionid=abc; csrftoken=t0k%2Ben; theme=dark";
        assert_eq!(token_from_cookies(cookies, "csrftoken").as_deref(), Some("t0k+en"));
        assert_eq!(token_from_cookies(cookies, "missing"), None);
        assert_eq!(token_from_cookies("", "csrftoken"), None);
    }

    #[test]
    fn test_cookie_lookup_needs_exact_name() {
        let cookies = "csrftoken_old=stale; csrftoken=fresh";
        assert_eq!(token_from_cookies(cookies, "csrftoken").as_deref(), Some("fresh"));
    }

    #[test]
    fn test_form_value_wins_over_cookie() {
        let token = CsrfToken::resolve(DEFAULT_HEADER, Some("from-form".into()), "csrftoken=from-cookie", DEFAULT_COOKIE);
        assert_eq!(token.header(), Some(("X-CSRFToken", "from-form")));

        let token = CsrfToken::resolve(DEFAULT_HEADER, Some("  ".into()), "csrftoken=from-cookie", DEFAULT_COOKIE);
        assert_eq!(token.value(), Some("from-cookie"));
    }

    #[test]
    fn test_missing_token_yields_no_header() {
        let token = CsrfToken::resolve(DEFAULT_HEADER, None, "sessionid=abc", DEFAULT_COOKIE);
        assert_eq!(token.header(), None);
    }
}
