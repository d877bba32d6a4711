//! Token store backed by the request's cookies
//!
//! The login flow stores bearer tokens and the account number as cookies,
//! which makes them the server-side view of the client's persistent storage.

use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use bankweb_core::TokenStore;

#[derive(Debug, Clone, Default)]
pub struct CookieTokenStore {
    jar: CookieJar,
}

impl CookieTokenStore {
    /// Parse every `Cookie` header of the request. Values are percent-decoded.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
        }
    }
}

impl TokenStore for CookieTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.jar
            .get(key)
            .map(|cookie| cookie.value_trimmed().to_string())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    #[test]
    fn test_parses_cookie_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("authToken=abc.def; accountNumber=ACC%2D1; theme=dark"),
        );
        let store = CookieTokenStore::from_headers(&headers);
        assert_eq!(store.get("authToken").as_deref(), Some("abc.def"));
        assert_eq!(store.get("accountNumber").as_deref(), Some("ACC-1"));
        assert_eq!(store.get("adminAuthToken"), None);
    }

    #[test]
    fn test_multiple_headers_and_empty_values() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("adminAuthToken=; junk"));
        headers.append(header::COOKIE, HeaderValue::from_static("authToken=\"quoted\""));
        let store = CookieTokenStore::from_headers(&headers);
        assert_eq!(store.get("adminAuthToken"), None);
        assert_eq!(store.get("authToken").as_deref(), Some("quoted"));
    }

    #[test]
    fn test_no_cookie_header() {
        let store = CookieTokenStore::from_headers(&HeaderMap::new());
        assert_eq!(store.get("authToken"), None);
    }
}
