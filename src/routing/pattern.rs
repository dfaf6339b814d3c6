//! URI template compilation.
//!
//! # Responsibilities
//! - Turn a template such as `/run/:id/*rest` into an anchored matcher
//! - Extract named path variables from a concrete request path
//!
//! # Design Decisions
//! - Literal segments are regex-escaped, so `.` or `+` in a template are plain text
//! - `:name` matches exactly one non-empty segment; `*name` matches the rest of
//!   the path (possibly empty, possibly containing `/`) and must be last
//! - Captures are positional; names live beside the regex so a repeated name
//!   resolves last-wins instead of failing regex compilation
//! - Compiled once at load time; never per request

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

/// Errors produced while compiling a URI template.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A `:` or `*` segment without a name.
    #[error("capture segment {segment:?} has no name")]
    EmptyName { segment: String },

    /// A `*name` segment that is not the final segment.
    #[error("wildcard segment {segment:?} must be the last segment")]
    WildcardNotLast { segment: String },

    /// The generated expression was rejected by the regex engine.
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// A compiled URI template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    regex: Regex,
    /// Capture names in group order (group `i + 1` is `captures[i]`).
    captures: Vec<String>,
    wildcard: bool,
}

impl PathPattern {
    /// Compile a URI template.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        // Empty segments emit nothing but still count when placing the wildcard,
        // so `/files/*rest/` is rejected.
        let segments: Vec<&str> = template.trim_start_matches('/').split('/').collect();
        let last = segments.len().saturating_sub(1);

        let mut expr = String::from("^");
        let mut captures = Vec::new();
        let mut wildcard = false;

        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                continue;
            }
            expr.push('/');

            if let Some(name) = segment.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::EmptyName { segment: segment.to_string() });
                }
                expr.push_str("([^/]+)");
                captures.push(name.to_string());
            } else if let Some(name) = segment.strip_prefix('*') {
                if i != last {
                    return Err(PatternError::WildcardNotLast { segment: segment.to_string() });
                }
                if name.is_empty() {
                    return Err(PatternError::EmptyName { segment: segment.to_string() });
                }
                expr.push_str("(.*)");
                captures.push(name.to_string());
                wildcard = true;
            } else {
                expr.push_str(&regex::escape(segment));
            }
        }

        // Only the root template produces no segments at all.
        if expr == "^" {
            expr.push('/');
        }
        expr.push('$');

        Ok(Self {
            template: template.to_string(),
            regex: Regex::new(&expr)?,
            captures,
            wildcard,
        })
    }

    /// Match a request path, returning the extracted path variables.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.regex.captures(path)?;
        let mut vars = HashMap::with_capacity(self.captures.len());
        for (i, name) in self.captures.iter().enumerate() {
            let value = caps.get(i + 1).map(|m| m.as_str()).unwrap_or_default();
            vars.insert(name.clone(), value.to_string());
        }
        Some(vars)
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the template ends in a `*name` tail capture.
    pub fn has_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Capture names in declaration order.
    pub fn capture_names(&self) -> &[String] {
        &self.captures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_template() {
        let pattern = PathPattern::compile("/status/all").unwrap();
        assert!(pattern.matches("/status/all").unwrap().is_empty());
        assert!(pattern.matches("/status/all/").is_none());
        assert!(pattern.matches("/status").is_none());
        assert!(!pattern.has_wildcard());
    }

    #[test]
    fn test_literal_metacharacters_are_escaped() {
        let pattern = PathPattern::compile("/v1.0/a+b").unwrap();
        assert!(pattern.matches("/v1.0/a+b").is_some());
        assert!(pattern.matches("/v1x0/aab").is_none());
    }

    #[test]
    fn test_named_capture() {
        let pattern = PathPattern::compile("/run/:id").unwrap();
        let vars = pattern.matches("/run/42").unwrap();
        assert_eq!(vars.get("id").map(String::as_str), Some("42"));

        // Exactly one non-empty segment.
        assert!(pattern.matches("/run/").is_none());
        assert!(pattern.matches("/run/4/2").is_none());
    }

    #[test]
    fn test_multiple_captures() {
        let pattern = PathPattern::compile("/svc/:name/logs/:lines").unwrap();
        let vars = pattern.matches("/svc/nginx/logs/100").unwrap();
        assert_eq!(vars["name"], "nginx");
        assert_eq!(vars["lines"], "100");
        assert_eq!(pattern.capture_names(), ["name", "lines"]);
    }

    #[test]
    fn test_wildcard_tail() {
        let pattern = PathPattern::compile("/files/*rest").unwrap();
        assert!(pattern.has_wildcard());

        let vars = pattern.matches("/files/a/b/c.txt").unwrap();
        assert_eq!(vars["rest"], "a/b/c.txt");

        let vars = pattern.matches("/files/").unwrap();
        assert_eq!(vars["rest"], "");
    }

    #[test]
    fn test_capture_and_wildcard() {
        let pattern = PathPattern::compile("/run/:name/*rest").unwrap();
        let vars = pattern.matches("/run/deploy/eu/west").unwrap();
        assert_eq!(vars["name"], "deploy");
        assert_eq!(vars["rest"], "eu/west");
    }

    #[test]
    fn test_wildcard_must_be_last() {
        let err = PathPattern::compile("/files/*rest/tail").unwrap_err();
        assert!(matches!(err, PatternError::WildcardNotLast { .. }));

        let err = PathPattern::compile("/files/*rest/").unwrap_err();
        assert!(matches!(err, PatternError::WildcardNotLast { .. }));
    }

    #[test]
    fn test_empty_capture_name_rejected() {
        assert!(matches!(
            PathPattern::compile("/run/:").unwrap_err(),
            PatternError::EmptyName { .. }
        ));
        assert!(matches!(
            PathPattern::compile("/run/*").unwrap_err(),
            PatternError::EmptyName { .. }
        ));
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let pattern = PathPattern::compile("/a/:x/b/:x").unwrap();
        let vars = pattern.matches("/a/first/b/second").unwrap();
        assert_eq!(vars["x"], "second");
    }

    #[test]
    fn test_empty_segments_skipped() {
        let pattern = PathPattern::compile("/run//:id/").unwrap();
        assert_eq!(pattern.matches("/run/7").unwrap()["id"], "7");
    }

    #[test]
    fn test_root_template() {
        let pattern = PathPattern::compile("/").unwrap();
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/x").is_none());
    }
}
