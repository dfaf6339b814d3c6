//! Route lookup.
//!
//! # Responsibilities
//! - Scan compiled endpoints in registry order
//! - Return the first endpoint whose method and path both match
//!
//! # Design Decisions
//! - Linear scan; registry order is the only tie-breaker
//! - Explicit `None` rather than a silent default route

use std::collections::HashMap;

use crate::endpoint::Endpoint;

/// A matched endpoint and the variables extracted from the request path.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub endpoint: &'a Endpoint,
    pub path_vars: HashMap<String, String>,
}

/// Find the first endpoint accepting `method` and `path`.
pub fn first_match<'a>(endpoints: &'a [Endpoint], method: &str, path: &str) -> Option<RouteMatch<'a>> {
    endpoints.iter().find_map(|endpoint| {
        if endpoint.method() != method {
            return None;
        }
        endpoint
            .pattern()
            .matches(path)
            .map(|path_vars| RouteMatch { endpoint, path_vars })
    })
}
