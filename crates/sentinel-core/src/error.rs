//! Error types for sentinel-core
//!
//! One enum covers the domain: storage failures, lookup misses, and the
//! client-facing invariant violations the services raise.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entity lookup failed
    #[error("{entity} not found")]
    NotFound {
        /// Entity type name as shown to clients
        entity: &'static str,
    },

    /// Email uniqueness violated on signup
    #[error("Email already registered")]
    EmailTaken,

    /// Login rejected; deliberately identical for unknown email and bad password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Event payload missing a required field
    #[error("malformed event payload: missing '{0}'")]
    Payload(&'static str),

    /// Storage bootstrap error (directory creation, bad path)
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        let err = Error::NotFound { entity: "User" };
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn test_credential_errors_are_indistinguishable() {
        // Unknown email and wrong password must render the same detail
        assert_eq!(
            Error::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_email_taken_message() {
        assert_eq!(Error::EmailTaken.to_string(), "Email already registered");
    }
}
