//! Application configuration loaded from environment variables.
//!
//! Secrets are injected as environment variables by the deployment and read
//! once at startup.

use std::env;

/// Where profiles are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileBackend {
    Firestore,
    /// Empty process-local store, for local development
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Public app URL (CORS origin, cookie security)
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Secondary-brand hostname whose root serves the questionnaire
    pub questionnaire_host: String,
    /// Legacy admin override address, compared case-sensitively
    pub admin_email: Option<String>,
    /// Directory holding the built page bundle
    pub site_dir: String,
    pub profile_backend: ProfileBackend,

    // --- Secrets ---
    /// JWT secret shared with the auth provider (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            questionnaire_host: "questionario.localhost".to_string(),
            admin_email: Some("admin@example.com".to_string()),
            site_dir: "web/dist".to_string(),
            profile_backend: ProfileBackend::Memory,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let profile_backend = match env::var("PROFILE_STORE").as_deref() {
            Ok("memory") => ProfileBackend::Memory,
            Ok("firestore") | Err(_) => ProfileBackend::Firestore,
            Ok(_) => return Err(ConfigError::Invalid("PROFILE_STORE")),
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            questionnaire_host: env::var("QUESTIONNAIRE_HOST")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| "questionario.localhost".to_string()),
            admin_email: env::var("ADMIN_EMAIL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            site_dir: env::var("SITE_DIR").unwrap_or_else(|_| "web/dist".to_string()),
            profile_backend,

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Cookies get the `Secure` attribute when served over HTTPS.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
