// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page bundle service.

use crate::config::Config;
use crate::gate::{is_asset_path, normalize_path};
use axum::{
    extract::Request,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// Serve the built page bundle from `site_dir`.
///
/// Unknown page paths fall back to `index.html` so client-side routes
/// load. Unknown asset paths are a plain 404: they skip the access gate,
/// so they must not be answered with the app shell.
pub fn site(config: &Config) -> Router {
    let dir = Path::new(&config.site_dir);
    let index = ServeFile::new(dir.join("index.html"));

    let app_shell = move |request: Request| {
        let index = index.clone();
        async move {
            let is_asset = normalize_path(request.uri().path())
                .is_some_and(|path| is_asset_path(&path));
            if is_asset {
                return StatusCode::NOT_FOUND.into_response();
            }

            match index.oneshot(request).await {
                Ok(response) => response.into_response(),
                Err(never) => match never {},
            }
        }
    };

    Router::new().fallback_service(ServeDir::new(dir).fallback(app_shell.into_service()))
}
