//! Annotation Identity and Payload Types
//!
//! This module defines the two value types the sync core moves around:
//! annotation identities (the coalescing key) and annotation payloads
//! (the serialized body written to the remote store).
//!
//! # Identity
//!
//! Identities are opaque strings owned by the remote annotation store.
//! Annotations created locally, before their first round trip through the
//! server, use [`AnnotationId::generate`] to mint a UUID-backed identity.
//!
//! # Payload
//!
//! Payloads are opaque at this layer: the core never interprets the
//! annotation body, it only carries it to the store and hands it back to
//! the UI when the store rejects it as too large.
//!
//! # Thread Safety
//!
//! Both types are `Send + Sync` and cheap to clone.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of an annotation, used as the coalescing key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(String);

impl AnnotationId {
    /// Wrap an identity assigned by the remote store
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh identity for a locally created annotation
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for AnnotationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Serialized annotation body as written to the remote store.
///
/// The sync core treats the body as opaque JSON; structure and validation
/// belong to the document viewer and the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationPayload {
    body: serde_json::Value,
}

impl AnnotationPayload {
    /// Create a payload from an annotation body
    pub fn new(body: serde_json::Value) -> Self {
        Self { body }
    }

    /// The annotation body
    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    /// Serialized size in bytes, used for logging around size-limit failures
    pub fn byte_len(&self) -> usize {
        self.body.to_string().len()
    }
}
