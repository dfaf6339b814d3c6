//! Response construction.
//!
//! Every response the gateway produces is `text/plain; charset=utf-8`,
//! including error responses and command failures.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::dispatch::TemplateError;

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// A plain-text response with the given status and body.
pub fn plain(status: StatusCode, body: impl Into<Body>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF8))],
        body.into(),
    )
        .into_response()
}

pub fn not_found() -> Response {
    plain(StatusCode::NOT_FOUND, "404 page not found\n")
}

pub fn unauthorized() -> Response {
    plain(StatusCode::UNAUTHORIZED, "unauthorized\n")
}

pub fn bad_template(err: &TemplateError) -> Response {
    plain(StatusCode::BAD_REQUEST, format!("bad template: {}\n", err))
}
