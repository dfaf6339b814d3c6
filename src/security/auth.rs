//! Shared-secret header authentication.

use axum::http::{header::HeaderName, HeaderMap};
use thiserror::Error;

/// Errors parsing an `auth` declaration.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("bad auth format, want Header:Token")]
    Format,

    #[error("empty header/token")]
    Empty,

    #[error("invalid header name {0:?}")]
    HeaderName(String),
}

/// The header and token a request must present.
#[derive(Clone)]
pub struct AuthRequirement {
    header: HeaderName,
    token: String,
}

impl AuthRequirement {
    /// Parse a `"Header:Token"` declaration.
    ///
    /// The string is split at the first `:`, so tokens may themselves contain
    /// colons. Both halves are trimmed and must be non-empty.
    pub fn parse(declaration: &str) -> Result<Self, AuthError> {
        let (header, token) = declaration.split_once(':').ok_or(AuthError::Format)?;
        let (header, token) = (header.trim(), token.trim());
        if header.is_empty() || token.is_empty() {
            return Err(AuthError::Empty);
        }

        let header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|_| AuthError::HeaderName(header.to_string()))?;

        Ok(Self {
            header,
            token: token.to_string(),
        })
    }

    /// Name of the header carrying the token.
    pub fn header_name(&self) -> &HeaderName {
        &self.header
    }

    /// Returns true if the first value of the header equals the token exactly.
    pub fn verify(&self, headers: &HeaderMap) -> bool {
        headers
            .get(&self.header)
            .map(|value| value.as_bytes() == self.token.as_bytes())
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for AuthRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequirement")
            .field("header", &self.header)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: &'static str, value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn test_parse_trims_halves() {
        let auth = AuthRequirement::parse(" X-Token : abc ").unwrap();
        assert_eq!(auth.header_name().as_str(), "x-token");
        assert!(auth.verify(&headers("x-token", "abc")));
    }

    #[test]
    fn test_token_may_contain_colons() {
        let auth = AuthRequirement::parse("Authorization:Bearer a:b:c").unwrap();
        assert!(auth.verify(&headers("authorization", "Bearer a:b:c")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(AuthRequirement::parse("X-Token"), Err(AuthError::Format)));
        assert!(matches!(AuthRequirement::parse(":abc"), Err(AuthError::Empty)));
        assert!(matches!(AuthRequirement::parse("X-Token: "), Err(AuthError::Empty)));
        assert!(matches!(
            AuthRequirement::parse("Bad Header:abc"),
            Err(AuthError::HeaderName(_))
        ));
    }

    #[test]
    fn test_verify_is_exact() {
        let auth = AuthRequirement::parse("X-Token:abc").unwrap();
        assert!(!auth.verify(&headers("x-token", "ABC")));
        assert!(!auth.verify(&headers("x-token", "abc ")));
        assert!(!auth.verify(&headers("x-other", "abc")));
        assert!(!auth.verify(&HeaderMap::new()));
    }

    #[test]
    fn test_debug_redacts_token() {
        let auth = AuthRequirement::parse("X-Token:supersecret").unwrap();
        assert!(!format!("{:?}", auth).contains("supersecret"));
    }
}
