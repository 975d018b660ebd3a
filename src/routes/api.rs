// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::gate::{normalize_path, Action, RouteClass, Session};
use crate::middleware::gate::request_hostname;
use crate::models::{Role, SubscriptionStatus};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, Uri},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/access", get(get_access))
}

// ─── Profile ─────────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub user_id: String,
    pub role: Role,
    pub email: String,
    pub approved: bool,
    pub subscription_status: Option<SubscriptionStatus>,
    pub has_active_subscription: bool,
    pub kyc_complete: bool,
    pub is_admin: bool,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .store
        .get_profile(&session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", session.user_id)))?
        .into_profile(state.config.admin_email.as_deref());

    Ok(Json(ProfileResponse {
        user_id: session.user_id,
        role: profile.role,
        has_active_subscription: profile.has_active_subscription(),
        kyc_complete: profile.has_completed_kyc(),
        email: profile.email,
        approved: profile.approved,
        subscription_status: profile.subscription_status,
        is_admin: profile.is_admin,
    }))
}

// ─── Access Check ────────────────────────────────────────────

#[derive(Deserialize)]
struct AccessQuery {
    /// Page path the client is about to navigate to
    path: String,
}

/// Gate decision for client-side navigation.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AccessResponse {
    pub path: String,
    pub route_class: RouteClass,
    /// "proceed", "rewrite" or "redirect"
    pub action: String,
    pub location: Option<String>,
}

/// Evaluate the access gate for the caller without navigating.
///
/// Same decision the page middleware would make for that path on this
/// host, so the client can route before the server has to redirect. The
/// returned `path` is the normalized one the decision was made on.
async fn get_access(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
    uri: Uri,
    Query(query): Query<AccessQuery>,
) -> Result<Json<AccessResponse>> {
    let path = normalize_path(&query.path).ok_or_else(|| {
        AppError::BadRequest("path must be absolute without '.' or '..' segments".to_string())
    })?;

    let hostname = request_hostname(&headers, &uri);

    let profile = state.profile_snapshot(&session.user_id).await;
    let action = state
        .gate
        .decide(&hostname, &path, Some(&session), profile.as_ref());

    let (action, location) = match action {
        Action::Proceed => ("proceed", None),
        Action::Rewrite(path) => ("rewrite", Some(path)),
        Action::Redirect(path) => ("redirect", Some(path)),
    };

    Ok(Json(AccessResponse {
        route_class: state.gate.routes().classify(&path),
        path,
        action: action.to_string(),
        location,
    }))
}
