// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::Uri;
use axum::Router;
use coach_gate::config::Config;
use coach_gate::db::ProfileStore;
use coach_gate::middleware::auth::create_jwt;
use coach_gate::models::{ProfileRecord, Role, SubscriptionStatus};
use coach_gate::routes::{create_router, create_router_with_pages};
use coach_gate::AppState;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Connect to the Firestore emulator.
#[allow(dead_code)]
pub async fn test_store() -> ProfileStore {
    ProfileStore::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Stand-in for the page bundle: echoes the path it was asked to serve.
#[allow(dead_code)]
pub fn echo_pages() -> Router {
    Router::new().fallback(|uri: Uri| async move { format!("page:{}", uri.path()) })
}

/// Create a test app with an in-memory profile store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), ProfileStore::new_in_memory())
}

/// Create a test app whose profile store is offline (every lookup fails).
#[allow(dead_code)]
pub fn create_offline_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), ProfileStore::new_mock())
}

#[allow(dead_code)]
pub fn create_test_app_with_frontend_url(frontend_url: &str) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.frontend_url = frontend_url.to_string();
    create_test_app_with(config, ProfileStore::new_in_memory())
}

/// Create a test app serving a real page bundle from `site_dir`.
#[allow(dead_code)]
pub fn create_site_test_app(site_dir: &Path) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.site_dir = site_dir.to_string_lossy().into_owned();
    let state = Arc::new(AppState::new(config, ProfileStore::new_in_memory()));
    (create_router(state.clone()), state)
}

/// Write a small page bundle under the system temp dir.
#[allow(dead_code)]
pub fn site_fixture(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("coach-gate-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(dir.join("coach/dashboard")).expect("Failed to create site dir");
    std::fs::create_dir_all(dir.join("images")).expect("Failed to create site dir");
    std::fs::write(dir.join("index.html"), "APP-SHELL").expect("Failed to write index");
    std::fs::write(dir.join("coach/dashboard/index.html"), "COACH-DASHBOARD")
        .expect("Failed to write coach dashboard");
    std::fs::write(dir.join("images/logo.png"), "PNG").expect("Failed to write logo");
    dir
}

fn create_test_app_with(config: Config, store: ProfileStore) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, store));
    (create_router_with_pages(state.clone(), echo_pages()), state)
}

/// Session token for `user_id` signed with the test key.
#[allow(dead_code)]
pub fn token_for(state: &AppState, user_id: &str) -> String {
    create_jwt(user_id, &state.config.jwt_signing_key).expect("Failed to create JWT")
}

#[allow(dead_code)]
pub fn coach_record(id: &str, status: Option<SubscriptionStatus>, kyc: bool) -> ProfileRecord {
    ProfileRecord {
        id: id.to_string(),
        role: Role::Coach,
        email: format!("{id}@coaches.example.com"),
        approved: false,
        subscription_status: status,
        charges_enabled: kyc,
        payouts_enabled: kyc,
        is_admin: None,
        updated_at: None,
    }
}

#[allow(dead_code)]
pub fn aluno_record(id: &str, approved: bool) -> ProfileRecord {
    ProfileRecord {
        id: id.to_string(),
        role: Role::Aluno,
        email: format!("{id}@alunos.example.com"),
        approved,
        subscription_status: None,
        charges_enabled: false,
        payouts_enabled: false,
        is_admin: None,
        updated_at: None,
    }
}

/// Store a profile and return a session token for it.
#[allow(dead_code)]
pub async fn seed(state: &AppState, record: ProfileRecord) -> String {
    state
        .store
        .upsert_profile(&record)
        .await
        .expect("Failed to seed profile");
    token_for(state, &record.id)
}
