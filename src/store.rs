//! Remote Annotation Store Contract
//!
//! This module defines the interface the sync core requires from the
//! remote annotation store. The store owns the wire format, the session,
//! and any internal timeout; the core only sees two idempotent-by-id
//! operations and the [`SyncError`] taxonomy.
//!
//! # Usage
//!
//! ```rust,no_run
//! use annosync::{AnnotationId, AnnotationPayload, AnnotationStore, SyncError};
//!
//! struct HttpStore;
//!
//! #[async_trait::async_trait]
//! impl AnnotationStore for HttpStore {
//!     async fn upsert(
//!         &self,
//!         id: &AnnotationId,
//!         payload: AnnotationPayload,
//!     ) -> Result<AnnotationPayload, SyncError> {
//!         // PUT /annotations/{id} ...
//!         Ok(payload)
//!     }
//!
//!     async fn delete(&self, id: &AnnotationId) -> Result<(), SyncError> {
//!         // DELETE /annotations/{id} ...
//!         Ok(())
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::annotation::{AnnotationId, AnnotationPayload};
use crate::error::SyncError;

/// Remote store holding the server-side copy of every annotation.
///
/// Both operations are idempotent by id: retrying an upsert or a delete
/// after a failure is always safe.
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    /// Create or replace the annotation with the given identity.
    ///
    /// On success the store returns the payload as persisted, which may
    /// differ from the submitted one (server-side timestamps and the like).
    async fn upsert(
        &self,
        id: &AnnotationId,
        payload: AnnotationPayload,
    ) -> Result<AnnotationPayload, SyncError>;

    /// Remove the annotation with the given identity
    async fn delete(&self, id: &AnnotationId) -> Result<(), SyncError>;
}
