//! Endpoint definitions and their compiled form.
//!
//! A definition is the raw record read from an endpoint file. Compiling it
//! validates every field in a fixed order and produces an immutable [`Endpoint`].

use std::collections::HashMap;
use std::time::Duration;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::endpoint::duration::{parse_ttl, DurationError};
use crate::routing::{PathPattern, PatternError};
use crate::security::{AuthError, AuthRequirement};

/// TTL applied when a definition does not declare one.
pub const DEFAULT_TTL: &str = "8s";

/// Status returned on command failure when a definition does not declare one.
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Raw endpoint record as found in a definition file.
///
/// Every field defaults so that missing required fields are reported by
/// [`Endpoint::compile`] with a single descriptive error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointDefinition {
    /// URI template, e.g. `/run/:name/*rest`.
    pub uri: String,

    /// HTTP method, matched exactly.
    pub method: String,

    /// `"Header:Token"` shared secret.
    pub auth: String,

    /// Command argument vector with `{placeholders}`.
    pub script: Vec<String>,

    /// Command timeout, e.g. `8s`.
    pub ttl: Option<String>,

    /// HTTP status on command failure (0 means default).
    pub error: Option<u16>,

    /// Parameter defaults, lowest precedence.
    pub query: Option<HashMap<String, String>>,

    /// Parameter defaults, applied over `query`.
    pub body: Option<HashMap<String, String>>,

    /// Free-text description, ignored by routing.
    #[serde(alias = "description")]
    pub about: Option<String>,
}

/// Errors produced while compiling a single definition.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("missing required fields (uri/method/auth/script)")]
    MissingFields,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("bad ttl: {0}")]
    Ttl(#[from] DurationError),

    #[error("bad error status {0}")]
    ErrorStatus(u16),

    #[error("bad uri: {0}")]
    Uri(#[from] PatternError),
}

/// A compiled, immutable endpoint.
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: String,
    pattern: PathPattern,
    auth: AuthRequirement,
    script: Vec<String>,
    ttl: String,
    timeout: Duration,
    error_status: StatusCode,
    query_defaults: HashMap<String, String>,
    body_defaults: HashMap<String, String>,
    about: Option<String>,
}

impl Endpoint {
    /// Validate and compile a definition.
    ///
    /// Order: required fields, auth, ttl, error status, defaults, uri.
    pub fn compile(def: EndpointDefinition) -> Result<Self, DefinitionError> {
        if def.uri.is_empty() || def.method.is_empty() || def.auth.is_empty() || def.script.is_empty() {
            return Err(DefinitionError::MissingFields);
        }

        let auth = AuthRequirement::parse(&def.auth)?;

        let ttl = def
            .ttl
            .filter(|ttl| !ttl.is_empty())
            .unwrap_or_else(|| DEFAULT_TTL.to_string());
        let timeout = parse_ttl(&ttl)?;

        let error_status = match def.error.unwrap_or(0) {
            0 => DEFAULT_ERROR_STATUS,
            code => code,
        };
        let error_status =
            StatusCode::from_u16(error_status).map_err(|_| DefinitionError::ErrorStatus(error_status))?;

        let query_defaults = def.query.unwrap_or_default();
        let body_defaults = def.body.unwrap_or_default();

        let pattern = PathPattern::compile(&def.uri)?;

        Ok(Self {
            method: def.method,
            pattern,
            auth,
            script: def.script,
            ttl,
            timeout,
            error_status,
            query_defaults,
            body_defaults,
            about: def.about,
        })
    }

    pub fn uri(&self) -> &str {
        self.pattern.template()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn auth(&self) -> &AuthRequirement {
        &self.auth
    }

    pub fn script(&self) -> &[String] {
        &self.script
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn error_status(&self) -> StatusCode {
        self.error_status
    }

    pub fn query_defaults(&self) -> &HashMap<String, String> {
        &self.query_defaults
    }

    pub fn body_defaults(&self) -> &HashMap<String, String> {
        &self.body_defaults
    }

    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// Listing view of this endpoint. Never includes the auth token.
    pub fn summary(&self) -> EndpointSummary {
        EndpointSummary {
            method: self.method.clone(),
            uri: self.uri().to_string(),
            ttl: self.ttl.clone(),
            error: self.error_status.as_u16(),
            auth_header: self.auth.header_name().to_string(),
            wildcard: self.pattern.has_wildcard(),
            about: self.about.clone(),
        }
    }
}

/// Read-only description of a loaded endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointSummary {
    pub method: String,
    pub uri: String,
    pub ttl: String,
    pub error: u16,
    pub auth_header: String,
    pub wildcard: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> EndpointDefinition {
        EndpointDefinition {
            uri: "/run/:id".into(),
            method: "GET".into(),
            auth: "X-Token:abc".into(),
            script: vec!["bash".into(), "-lc".into(), "echo id={id}".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let ep = Endpoint::compile(definition()).unwrap();
        assert_eq!(ep.timeout(), Duration::from_secs(8));
        assert_eq!(ep.error_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(ep.query_defaults().is_empty());
        assert!(ep.body_defaults().is_empty());
        assert_eq!(ep.summary().ttl, "8s");
    }

    #[test]
    fn test_explicit_fields() {
        let mut def = definition();
        def.ttl = Some("1s".into());
        def.error = Some(502);
        def.query = Some(HashMap::from([("lines".to_string(), "10".to_string())]));
        let ep = Endpoint::compile(def).unwrap();
        assert_eq!(ep.timeout(), Duration::from_secs(1));
        assert_eq!(ep.error_status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ep.query_defaults()["lines"], "10");
    }

    #[test]
    fn test_zero_error_status_means_default() {
        let mut def = definition();
        def.error = Some(0);
        assert_eq!(Endpoint::compile(def).unwrap().error_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_required_fields() {
        for strip in ["uri", "method", "auth", "script"] {
            let mut def = definition();
            match strip {
                "uri" => def.uri.clear(),
                "method" => def.method.clear(),
                "auth" => def.auth.clear(),
                _ => def.script.clear(),
            }
            assert!(
                matches!(Endpoint::compile(def), Err(DefinitionError::MissingFields)),
                "missing {} should fail",
                strip
            );
        }
    }

    #[test]
    fn test_invalid_fields() {
        let mut def = definition();
        def.auth = "X-Token".into();
        assert!(matches!(Endpoint::compile(def), Err(DefinitionError::Auth(_))));

        let mut def = definition();
        def.ttl = Some("soon".into());
        assert!(matches!(Endpoint::compile(def), Err(DefinitionError::Ttl(_))));

        let mut def = definition();
        def.error = Some(42);
        assert!(matches!(Endpoint::compile(def), Err(DefinitionError::ErrorStatus(42))));

        let mut def = definition();
        def.uri = "/a/*rest/b".into();
        assert!(matches!(Endpoint::compile(def), Err(DefinitionError::Uri(_))));
    }

    #[test]
    fn test_auth_checked_before_ttl() {
        let mut def = definition();
        def.auth = ":".into();
        def.ttl = Some("bad".into());
        assert!(matches!(Endpoint::compile(def), Err(DefinitionError::Auth(_))));
    }

    #[test]
    fn test_deserialize_with_description_alias() {
        let def: EndpointDefinition = serde_json::from_str(
            r#"{"uri":"/x","method":"POST","auth":"H:t","script":["true"],"description":"noop","extra":1}"#,
        )
        .unwrap();
        assert_eq!(def.about.as_deref(), Some("noop"));
        let ep = Endpoint::compile(def).unwrap();
        assert_eq!(ep.summary().about.as_deref(), Some("noop"));
        assert_eq!(ep.summary().auth_header, "h");
    }
}
