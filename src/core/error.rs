// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for uacodec.
//!
//! Provides the error taxonomy for registry and codec dispatch operations:
//! - Encode-side failures (missing codec, unresolved namespace)
//! - Decode-side failures (missing codec, malformed wire data)
//! - Bootstrap initialization failures
//!
//! Lookup misses are not errors: registry and dictionary lookups return
//! `Option` and only the dispatcher, which cannot proceed without a codec,
//! turns a miss into a hard error.

use std::fmt;

/// Errors that can occur during registry and codec dispatch operations.
#[derive(Debug, Clone)]
pub enum UaError {
    /// Encoding failed
    Encoding {
        /// What was being encoded (type name or identifier)
        context: String,
        /// Error message
        message: String,
    },

    /// Decoding failed
    Decoding {
        /// What was being decoded (type name or identifier)
        context: String,
        /// Error message
        message: String,
    },

    /// Built-in type bootstrap aborted
    Initialization {
        /// Entry being registered when the bootstrap failed
        entry: String,
        /// Underlying cause
        cause: String,
    },
}

impl UaError {
    /// Create an encoding error.
    pub fn encoding(context: impl Into<String>, message: impl Into<String>) -> Self {
        UaError::Encoding {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a decoding error.
    pub fn decoding(context: impl Into<String>, message: impl Into<String>) -> Self {
        UaError::Decoding {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an initialization error wrapping the failed entry and cause.
    pub fn initialization(entry: impl Into<String>, cause: impl fmt::Display) -> Self {
        UaError::Initialization {
            entry: entry.into(),
            cause: cause.to_string(),
        }
    }

    /// Create a "no codec registered" error for the encode path.
    pub fn no_encoder(encoding_id: impl fmt::Display) -> Self {
        UaError::Encoding {
            context: encoding_id.to_string(),
            message: "no codec registered for encoding id".to_string(),
        }
    }

    /// Create a "no codec registered" error for the decode path.
    pub fn no_decoder(encoding_id: impl fmt::Display) -> Self {
        UaError::Decoding {
            context: encoding_id.to_string(),
            message: "no codec registered for encoding id".to_string(),
        }
    }

    /// Create an encode-side "namespace not registered" error.
    pub fn namespace_not_registered_encoding(uri: impl Into<String>) -> Self {
        UaError::Encoding {
            context: uri.into(),
            message: "namespace not registered".to_string(),
        }
    }

    /// Create a decode-side "namespace not registered" error.
    pub fn namespace_not_registered_decoding(uri: impl Into<String>) -> Self {
        UaError::Decoding {
            context: uri.into(),
            message: "namespace not registered".to_string(),
        }
    }

    /// Create a buffer-too-short decoding error.
    pub fn buffer_too_short(requested: usize, available: usize, position: usize) -> Self {
        UaError::Decoding {
            context: "binary".to_string(),
            message: format!(
                "buffer too short: requested {requested} bytes at position {position}, but only {available} bytes available"
            ),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            UaError::Encoding { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            UaError::Decoding { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            UaError::Initialization { entry, cause } => {
                vec![("entry", entry.clone()), ("cause", cause.clone())]
            }
        }
    }
}

impl fmt::Display for UaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UaError::Encoding { context, message } => {
                write!(f, "Encoding error for '{context}': {message}")
            }
            UaError::Decoding { context, message } => {
                write!(f, "Decoding error for '{context}': {message}")
            }
            UaError::Initialization { entry, cause } => {
                write!(
                    f,
                    "Initialization failed while registering '{entry}': {cause}"
                )
            }
        }
    }
}

impl std::error::Error for UaError {}

impl From<std::io::Error> for UaError {
    fn from(err: std::io::Error) -> Self {
        UaError::Decoding {
            context: "io".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for uacodec operations.
pub type Result<T> = std::result::Result<T, UaError>;
