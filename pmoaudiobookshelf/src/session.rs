//! Authenticated context shared by every query

use crate::error::{AbsError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::fmt;

/// Base URL plus bearer credential
///
/// A `Session` always holds a non-empty token and headers consistent with it.
/// It is immutable: a new login produces a new `Session`.
#[derive(Clone)]
pub struct Session {
    base_url: String,
    token: String,
    auth_headers: HeaderMap,
}

impl Session {
    /// Builds the session and its headers
    ///
    /// # Errors
    ///
    /// * `AbsError::MissingField` - empty token
    /// * `AbsError::InvalidHeader` - token not representable in a header
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(AbsError::MissingField {
                endpoint: crate::api::auth::LOGIN_ENDPOINT.to_string(),
                field: "token",
            });
        }

        let mut auth_headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token))?;
        bearer.set_sensitive(true);
        auth_headers.insert(AUTHORIZATION, bearer);
        auth_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            base_url: base_url.into(),
            token,
            auth_headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `Authorization` and `Content-Type` headers sent with every query
    pub fn auth_headers(&self) -> &HeaderMap {
        &self.auth_headers
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_match_token() {
        let session = Session::new("https://abs.local", "tok123").unwrap();
        assert_eq!(session.token(), "tok123");
        assert_eq!(
            session.auth_headers().get(AUTHORIZATION).unwrap(),
            "Bearer tok123"
        );
        assert_eq!(
            session.auth_headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = Session::new("https://abs.local", "").unwrap_err();
        assert!(matches!(err, AbsError::MissingField { field: "token", .. }));
    }

    #[test]
    fn test_token_with_newline_rejected() {
        let err = Session::new("https://abs.local", "bad\ntoken").unwrap_err();
        assert!(matches!(err, AbsError::InvalidHeader(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session::new("https://abs.local", "secret-token").unwrap();
        assert!(!format!("{:?}", session).contains("secret-token"));
    }
}
