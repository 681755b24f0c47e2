//! Annotation Sync Subsystem
//!
//! Serializes user edits to document annotations into a reliable, ordered
//! stream of network operations against the remote annotation store.
//!
//! # Architecture
//!
//! The subsystem consists of two tightly coupled components:
//! - **Task Queue** (`queue.rs`): pending operations, keyed by annotation
//!   identity, with last-write-wins coalescing and first-touch ordering
//! - **Sync Controller** (`controller.rs`): drains the queue one task at
//!   a time, never more than one network operation in flight, pausing on
//!   failure until a retry or a new edit
//!
//! # Data Flow
//!
//! ```text
//! UI edit → queue (coalesce) → controller drain → store operation
//!                                    │
//!                success ────────────┤──────────── failure
//!            drain next / finished   │   put back + pause + notify
//! ```
//!
//! Everything up to the store operation is synchronous and non-blocking;
//! the store operation itself is the only asynchronous boundary.

pub mod controller;
pub mod queue;
pub mod task;

// Re-export main types
pub use controller::{ControllerState, SyncController, SyncStatus};
pub use queue::TaskQueue;
pub use task::SyncTask;
