//! Sync Error Types
//!
//! This module defines the error taxonomy the remote annotation store
//! reports back to the sync core.
//!
//! # Error Categories
//!
//! - `PayloadTooLarge` - the store's size-limit policy rejected the
//!   annotation body; the user has to trim content before it can save
//! - `Other` - any other transient or permanent failure (network, server,
//!   timeout), worth a manual retry
//!
//! Neither category is retried automatically: the controller pauses and
//! waits for an explicit retry or a new edit, so a persistent failure is
//! never masked by a silent retry loop.
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across
//! thread boundaries.

use thiserror::Error;

/// Failures reported by the remote annotation store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The annotation body exceeds the store's size limit
    #[error("annotation payload exceeds the size limit")]
    PayloadTooLarge,

    /// Any other failure while talking to the store
    #[error("failed to save annotation: {message}")]
    Other {
        /// Human-readable error message
        message: String,
    },
}

impl SyncError {
    /// Create a generic sync failure
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Whether this failure came from the size-limit policy
    pub fn is_payload_too_large(&self) -> bool {
        matches!(self, Self::PayloadTooLarge)
    }
}
