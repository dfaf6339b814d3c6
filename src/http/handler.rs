//! Endpoint dispatch handler.
//!
//! Runs the per-request pipeline for everything except `/health`:
//! route match → auth → parameter resolution → template expansion → execution.
//! Each stage can end the request; later stages never run after an early exit.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Response,
};

use crate::dispatch::{expand, resolve};
use crate::http::request::request_id;
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics::{self, NO_ENDPOINT};

/// Health probe. Answers every method, bypasses the registry and auth.
pub async fn health() -> Response {
    response::plain(StatusCode::OK, "ok")
}

/// Fallback handler dispatching to the first matching endpoint.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let method = request.method().as_str().to_string();
    let raw_path = request.uri().path();
    let path = urlencoding::decode(raw_path)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw_path.to_string());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    // 1. Match Route
    let route = match state.registry.find(&method, &path) {
        Some(route) => route,
        None => {
            tracing::warn!(request_id = %request_id, method = %method, path = %path, "No endpoint matched");
            metrics::record_request(&method, NO_ENDPOINT, 404, start_time);
            return response::not_found();
        }
    };
    let endpoint = route.endpoint;

    // 2. Authenticate
    if !endpoint.auth().verify(request.headers()) {
        tracing::warn!(
            request_id = %request_id,
            uri = %endpoint.uri(),
            header = %endpoint.auth().header_name(),
            "Authentication failed"
        );
        metrics::record_request(&method, endpoint.uri(), 401, start_time);
        return response::unauthorized();
    }

    // 3. Resolve Parameters
    let query = request.uri().query().map(str::to_string);
    let body = match axum::body::to_bytes(request.into_body(), usize::MAX).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::debug!(request_id = %request_id, error = %e, "Request body unreadable, ignoring");
            None
        }
    };
    let params = resolve(endpoint, &route.path_vars, query.as_deref(), body.as_deref());

    // 4. Expand Template
    let argv = match expand(endpoint.script(), &params) {
        Ok(argv) => argv,
        Err(e) => {
            tracing::warn!(request_id = %request_id, uri = %endpoint.uri(), error = %e, "Bad template");
            metrics::record_request(&method, endpoint.uri(), 400, start_time);
            return response::bad_template(&e);
        }
    };

    // 5. Execute
    let result = state.executor.run(&argv, endpoint.timeout()).await;
    let response = match result {
        Ok(output) => {
            metrics::record_execution(endpoint.uri(), "success");
            response::plain(StatusCode::OK, output)
        }
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                uri = %endpoint.uri(),
                status = %endpoint.error_status(),
                error = %e,
                "Command failed"
            );
            metrics::record_execution(endpoint.uri(), e.outcome());
            response::plain(endpoint.error_status(), e.into_body())
        }
    };

    metrics::record_request(&method, endpoint.uri(), response.status().as_u16(), start_time);
    response
}
