// SPDX-FileCopyrightText: 2026 Mesa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Mesa assistant.

use std::path::PathBuf;

use strum::Display;
use thiserror::Error;

/// Boxed error source carried by the capability variants.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Which offline artifact of the knowledge base a load error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArtifactKind {
    /// The `(n_records, d)` embedding matrix.
    #[strum(serialize = "embedding matrix")]
    Embeddings,
    /// The parallel list of FAQ metadata records.
    #[strum(serialize = "metadata file")]
    Metadata,
}

/// The primary error type used across all Mesa crates.
#[derive(Debug, Error)]
pub enum MesaError {
    /// Configuration errors (missing API credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A required knowledge-base artifact does not exist.
    #[error("{kind} not found at {}", .path.display())]
    MissingArtifact { kind: ArtifactKind, path: PathBuf },

    /// A knowledge-base artifact exists but cannot be decoded.
    #[error("corrupt artifact {}: {reason}", .path.display())]
    CorruptArtifact { path: PathBuf, reason: String },

    /// The embedding capability failed while retrieving grounding context.
    #[error("retrieval failed: {message}")]
    Retrieval {
        message: String,
        source: Option<BoxedSource>,
    },

    /// The completion capability failed to produce a reply.
    #[error("completion failed: {message}")]
    Completion {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Transport or API errors inside a provider adapter.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Reservation store errors (IO, locking, corrupt rows).
    #[error("storage error: {message}")]
    Storage {
        message: String,
        source: Option<BoxedSource>,
    },

    /// The external notification collaborator failed.
    #[error("notification failed: {message}")]
    Notification {
        message: String,
        source: Option<BoxedSource>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MesaError {
    /// Wraps an IO-level failure of the reservation store.
    pub fn storage(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        MesaError::Storage {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns true for errors that abort startup rather than a single turn.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MesaError::Config(_)
                | MesaError::MissingArtifact { .. }
                | MesaError::CorruptArtifact { .. }
        )
    }
}
