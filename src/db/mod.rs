//! Database layer (Firestore).

pub mod firestore;

pub use firestore::ProfileStore;

/// Collection names as constants.
pub mod collections {
    /// User profiles (keyed by auth user ID)
    pub const PROFILES: &str = "profiles";
}
