// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Fitwise.

use thiserror::Error;

/// The error type used across all Fitwise crates.
#[derive(Debug, Error)]
pub enum FitwiseError {
    /// Missing or invalid configuration, including absent credentials.
    #[error("configuration error: {0}")]
    Config(String),

    /// Record store or corpus file failure.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The embedding model could not be downloaded or loaded.
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    /// Tokenization or inference failed for a loaded model.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The external text-generation step failed.
    #[error("generation error: {message}")]
    Generation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A record that was asked for by id does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FitwiseError {
    /// Wraps any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FitwiseError::Storage {
            source: Box::new(err),
        }
    }
}
