//! Error types for the datastore-cluster inventory collector
//!
//! Provides structured error types for parameter validation, vCenter
//! session handling, and inventory lookups.

use thiserror::Error;

/// Unified error type for the collector
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Inventory Lookup Errors
    // =========================================================================
    #[error("Failed to find the folder specified by '{path}'")]
    FolderNotFound { path: String },

    #[error("Failed to find datacenter '{name}' required for managing datastore cluster")]
    DatacenterNotFound { name: String },

    #[error("Failed to find datastore cluster '{name}'")]
    ClusterNotFound { name: String },

    // =========================================================================
    // vCenter Session Errors
    // =========================================================================
    #[error("vCenter session error: {0}")]
    Session(#[from] reqwest::Error),

    #[error("vCenter authentication failed for user '{username}'")]
    Authentication { username: String },

    #[error("Unexpected vCenter API response: {status} from {path}")]
    UnexpectedResponse { status: u16, path: String },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Config file parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error is an inventory lookup failure (as opposed to a
    /// transport, parse, or validation failure)
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Error::FolderNotFound { .. }
                | Error::DatacenterNotFound { .. }
                | Error::ClusterNotFound { .. }
        )
    }
}

/// Result type alias for the collector
pub type Result<T> = std::result::Result<T, Error>;
