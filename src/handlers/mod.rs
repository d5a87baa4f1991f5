// src/handlers/mod.rs

pub mod feedback;
pub mod health;
pub mod home;
pub mod question;
pub mod quiz;

use axum::http::HeaderMap;

/// True when the request was issued by htmx and expects a fragment.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
