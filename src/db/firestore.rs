// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed profile store.
//!
//! Profiles are owned by the registration flow and the payments webhook;
//! this service reads them once per gated request. Writes exist for
//! provisioning and tests.

use crate::db::collections;
use crate::error::AppError;
use crate::models::ProfileRecord;
use dashmap::DashMap;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(Arc<DashMap<String, ProfileRecord>>),
    Offline,
}

/// Profile store client. Cheap to clone.
#[derive(Clone)]
pub struct ProfileStore {
    backend: Backend,
}

impl ProfileStore {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Process-local store for development and tests.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    fn offline_error() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    /// Get a profile by user ID.
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRecord>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::PROFILES)
                .obj()
                .one(user_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(profiles) => Ok(profiles.get(user_id).map(|p| p.value().clone())),
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    /// Create or update a profile.
    pub async fn upsert_profile(&self, profile: &ProfileRecord) -> Result<(), AppError> {
        profile
            .validate()
            .map_err(|e| AppError::BadRequest(format!("Invalid profile: {}", e)))?;

        let mut profile = profile.clone();
        profile.updated_at = Some(chrono::Utc::now().to_rfc3339());

        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::PROFILES)
                    .document_id(&profile.id)
                    .object(&profile)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
            Backend::Memory(profiles) => {
                profiles.insert(profile.id.clone(), profile);
            }
            Backend::Offline => return Err(Self::offline_error()),
        }

        Ok(())
    }

    /// Delete a profile. Deleting a missing profile is not an error.
    pub async fn delete_profile(&self, user_id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                client
                    .fluent()
                    .delete()
                    .from(collections::PROFILES)
                    .document_id(user_id)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
            Backend::Memory(profiles) => {
                profiles.remove(user_id);
            }
            Backend::Offline => return Err(Self::offline_error()),
        }

        Ok(())
    }
}
