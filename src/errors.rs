//! Error types for the bingo hall
//!
//! Game rule violations are `Rejection`s: they are answered to the player
//! and never change state. Everything else is infrastructure failure that
//! the caller decides how to surface.

use crate::common::types::ChatId;

/// Root error type for all hall operations
#[derive(Debug, thiserror::Error)]
pub enum HallError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),
}

/// Configuration and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Storage system errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database open failed: {0}")]
    DatabaseOpenFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Corrupted data: {0}")]
    CorruptedData(String),
}

/// Failure to deliver a message to a single recipient
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeliveryError {
    #[error("Chat {0} is unreachable")]
    Unreachable(ChatId),
}

/// Invalid input or a violated precondition.
///
/// Always reported back to the caller, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("a game is already active")]
    AlreadyActive,

    #[error("no active game")]
    NotActive,

    #[error("player already has a card")]
    AlreadyRegistered,

    #[error("player has no card")]
    NotRegistered,

    #[error("chat {0} is not approved for games")]
    ChatNotApproved(ChatId),

    #[error("admin only")]
    NotAdmin,

    #[error("unknown game type '{0}'")]
    UnknownGameType(String),

    #[error("unknown pattern '{0}'")]
    UnknownPattern(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl From<rocksdb::Error> for HallError {
    fn from(e: rocksdb::Error) -> Self {
        HallError::Storage(StorageError::WriteFailed(e.to_string()))
    }
}

impl From<std::io::Error> for HallError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => HallError::Storage(StorageError::ReadFailed(e.to_string())),
            _ => HallError::Storage(StorageError::WriteFailed(e.to_string())),
        }
    }
}

impl From<serde_json::Error> for HallError {
    fn from(e: serde_json::Error) -> Self {
        HallError::Storage(StorageError::CorruptedData(e.to_string()))
    }
}

impl From<toml::de::Error> for HallError {
    fn from(e: toml::de::Error) -> Self {
        HallError::Configuration(ConfigurationError::LoadFailed(e.to_string()))
    }
}

// Convenience type alias for Results
pub type HallResult<T> = Result<T, HallError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = HallError::Configuration(ConfigurationError::ValidationFailed("test".to_string()));

        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn test_rejection_details() {
        let err: HallError = Rejection::ChatNotApproved(ChatId(-12)).into();
        assert_eq!(err.to_string(), "Rejected: chat -12 is not approved for games");

        let unknown = Rejection::UnknownPattern("zigzag".to_string());
        assert!(unknown.to_string().contains("zigzag"));
    }

    #[test]
    fn test_error_conversion() {
        let storage_error = StorageError::ReadFailed("disk".to_string());
        let err: HallError = storage_error.into();

        match err {
            HallError::Storage(_) => {}
            _ => panic!("Expected storage error"),
        }
    }

    #[test]
    fn test_error_source() {
        let err = HallError::Delivery(DeliveryError::Unreachable(ChatId(1)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_mapping() {
        let err: HallError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, HallError::Storage(StorageError::ReadFailed(_))));
    }
}
