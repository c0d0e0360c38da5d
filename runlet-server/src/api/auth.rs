//! Basic authentication middleware
//!
//! Installed only when credentials are configured; without them every route
//! is open, matching the deployment modes the service supports.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::sync::Arc;

use crate::api::AppState;

/// Rejects requests lacking the configured `Authorization: Basic` header
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some((username, password)) = state.auth.as_ref() else {
        return next.run(request).await;
    };

    let expected = STANDARD.encode(format!("{username}:{password}"));
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Basic "))
        .is_some_and(|given| given == expected);

    if authorized {
        next.run(request).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"runlet\"")],
            "unauthorized\n",
        )
            .into_response()
    }
}
