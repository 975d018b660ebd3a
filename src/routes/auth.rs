// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie routes.
//!
//! Sign-in itself happens at the auth provider; the browser hands the
//! resulting access token to `/auth/session`, which answers with a
//! session token of our own in an HttpOnly cookie. Provider tokens are
//! short-lived; the session token lasts as long as the cookie.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{
    create_jwt, verify_token, SESSION_COOKIE, SESSION_LIFETIME_SECS,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", post(create_session))
        .route("/auth/logout", post(logout))
}

#[derive(Deserialize)]
pub struct SessionRequest {
    access_token: String,
}

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Exchange an access token for the session cookie.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<SessionRequest>,
) -> Result<(CookieJar, StatusCode)> {
    let session = verify_token(&body.access_token, &state.config.jwt_signing_key)
        .ok_or(AppError::InvalidToken)?;

    let token = create_jwt(&session.user_id, &state.config.jwt_signing_key)?;

    tracing::info!(user_id = %session.user_id, "Session cookie issued");

    let mut cookie = session_cookie(token, state.config.secure_cookies());
    cookie.set_max_age(time::Duration::seconds(SESSION_LIFETIME_SECS as i64));

    Ok((jar.add(cookie), StatusCode::NO_CONTENT))
}

/// Logout - clear the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let removal = session_cookie(String::new(), state.config.secure_cookies());
    (jar.remove(removal), StatusCode::NO_CONTENT)
}
