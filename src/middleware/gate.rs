// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page gating middleware.

use crate::error::AppError;
use crate::gate::{is_asset_path, normalize_path, Action};
use crate::middleware::auth::session_from_request;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, uri::PathAndQuery, HeaderMap, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Run the access gate in front of the page bundle.
///
/// Decisions are made on the decoded path the page bundle will serve, so
/// `/%63oach` is gated as `/coach`. Paths with dot segments are refused.
///
/// Looks the profile up once; a failed lookup is logged and treated as a
/// missing profile so the visitor is routed to a safe page instead of
/// seeing an error.
pub async fn access_gate(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(path) = normalize_path(request.uri().path()) else {
        tracing::warn!(path = %request.uri().path(), "Refusing unnormalizable page path");
        return AppError::BadRequest("invalid path".to_string()).into_response();
    };
    if is_asset_path(&path) {
        return next.run(request).await;
    }

    let hostname = request_hostname(request.headers(), request.uri());
    let session = session_from_request(&jar, request.headers(), &state.config.jwt_signing_key);

    let profile = match &session {
        Some(session) => state.profile_snapshot(&session.user_id).await,
        None => None,
    };

    let action = state
        .gate
        .decide(&hostname, &path, session.as_ref(), profile.as_ref());

    tracing::debug!(
        host = %hostname,
        path = %path,
        authenticated = session.is_some(),
        action = ?action,
        "Access gate decision"
    );

    match action {
        Action::Proceed => next.run(request).await,
        Action::Rewrite(target) => match rewrite_uri(request.uri(), &target) {
            Some(uri) => {
                *request.uri_mut() = uri;
                next.run(request).await
            }
            None => {
                tracing::error!(rewrite_to = %target, "Invalid rewrite target");
                next.run(request).await
            }
        },
        Action::Redirect(target) => Redirect::temporary(&target).into_response(),
    }
}

/// Hostname of the request without the port, from `Host` or the URI.
pub fn request_hostname(headers: &HeaderMap, uri: &Uri) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.host())
        .unwrap_or("");

    strip_port(host).to_string()
}

/// IPv6 literals keep their brackets, e.g. `[::1]:8080` -> `[::1]`.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    host.split(':').next().unwrap_or("")
}

/// Replace the path of `uri`, keeping its query string.
fn rewrite_uri(uri: &Uri, path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}
