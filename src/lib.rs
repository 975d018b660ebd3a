// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Coach-Gate: access gating for the coaching marketplace web app
//!
//! This crate fronts the page bundle. Every page request is authenticated,
//! the caller's profile is read once, and the access gate decides whether
//! to serve the page, rewrite it, or redirect into the right funnel
//! (login, plan selection, KYC onboarding, approval waiting room).

pub mod config;
pub mod db;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod models;
pub mod routes;

use config::Config;
use db::ProfileStore;
use gate::AccessGate;
use models::Profile;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: ProfileStore,
    pub gate: AccessGate,
}

impl AppState {
    pub fn new(config: Config, store: ProfileStore) -> Self {
        let gate = AccessGate::new(config.questionnaire_host.clone());
        Self {
            config,
            store,
            gate,
        }
    }

    /// Profile snapshot for a signed-in user.
    ///
    /// Lookup failures are logged and reported as `None`; callers treat
    /// that as "no privileges".
    pub async fn profile_snapshot(&self, user_id: &str) -> Option<Profile> {
        match self.store.get_profile(user_id).await {
            Ok(Some(record)) => Some(record.into_profile(self.config.admin_email.as_deref())),
            Ok(None) => {
                tracing::warn!(user_id, "Session without a profile");
                None
            }
            Err(e) => {
                tracing::warn!(
                    user_id,
                    error = %e,
                    "Profile lookup failed, gating without privileges"
                );
                None
            }
        }
    }
}
