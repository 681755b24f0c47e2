//! Annosync - Annotation Synchronization Core
//!
//! Annosync is the annotation-synchronization core of the document
//! viewer: it accepts user edits to document annotations (create, edit,
//! delete) arriving on a UI-driven timeline and serializes them into a
//! reliable, ordered stream of network operations against a remote
//! annotation store.
//!
//! # Overview
//!
//! The core provides:
//! - Last-write-wins coalescing of edit bursts per annotation
//! - Strict single-flight execution of store operations
//! - Pause-on-failure with explicit retry, so a persistent failure is
//!   never masked by an automatic retry loop
//! - Save-state and failure notifications for the UI
//!
//! # Module Structure
//!
//! - **`annotation`** - identity and payload value types
//! - **`error`** - the [`SyncError`] taxonomy
//! - **`store`** - the [`AnnotationStore`] contract of the remote store
//! - **`observer`** - the [`SyncObserver`] notification interface
//! - **`sync`** - the task queue and the serialized sync controller
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use annosync::{AnnotationId, AnnotationPayload, NoopObserver};
//! use annosync::sync::SyncController;
//! # use annosync::{AnnotationStore, SyncError};
//! # struct HttpStore;
//! # #[async_trait::async_trait]
//! # impl AnnotationStore for HttpStore {
//! #     async fn upsert(&self, _: &AnnotationId, p: AnnotationPayload) -> Result<AnnotationPayload, SyncError> { Ok(p) }
//! #     async fn delete(&self, _: &AnnotationId) -> Result<(), SyncError> { Ok(()) }
//! # }
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // One controller per open document session.
//! let controller = SyncController::new(Arc::new(HttpStore), Arc::new(NoopObserver));
//!
//! // Edits are submitted synchronously from the UI.
//! let id = AnnotationId::generate();
//! controller.submit_upsert(id.clone(), AnnotationPayload::new(
//!     serde_json::json!({ "contents": "highlight p.3" }),
//! ));
//! controller.submit_delete(id);
//!
//! // After a failure notification, the user can ask for another attempt.
//! controller.retry();
//! # }
//! ```
//!
//! # Scope
//!
//! Document rendering, the annotation visual model, session
//! establishment, and the initial bulk fetch of existing annotations all
//! live outside this crate; the core is an in-memory, session-scoped
//! component with best-effort in-session reliability.

pub mod annotation;
pub mod error;
pub mod observer;
pub mod store;
pub mod sync;

// Re-export the crate surface
pub use annotation::{AnnotationId, AnnotationPayload};
pub use error::SyncError;
pub use observer::{NoopObserver, SyncObserver};
pub use store::AnnotationStore;
pub use sync::{ControllerState, SyncController, SyncStatus, SyncTask, TaskQueue};
