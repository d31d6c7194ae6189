//! Backend error types.

use thiserror::Error;

/// Errors that can occur during backend operations.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Failed to open or reach the database.
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    /// The engine rejected a statement. The message is the engine's
    /// diagnostic text, unmodified.
    #[error("{message}")]
    ExecutionFailed { message: String },

    /// Schema introspection failed.
    #[error("Schema introspection failed: {message}")]
    SchemaIntrospection { message: String },

    /// Generic backend error.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl BackendError {
    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// Create an execution failed error.
    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
        }
    }

    /// Create a schema introspection error.
    pub fn schema_introspection(message: impl Into<String>) -> Self {
        Self::SchemaIntrospection {
            message: message.into(),
        }
    }
}
