//! Serialized Sync Controller
//!
//! Drains the coalescing queue one task at a time and turns each task
//! into a network operation against the remote annotation store.
//!
//! # Guarantees
//!
//! - **Single flight**: at most one store operation is in flight at any
//!   instant; the next starts only after the previous one's outcome has
//!   been applied.
//! - **Ordering**: tasks execute in queue order; a failed task is retried
//!   before anything enqueued after the failure.
//! - **Pause on failure**: any failure pauses draining until an explicit
//!   [`retry`](SyncController::retry) or a new edit; nothing is retried
//!   automatically, so a persistent failure stays visible to the user.
//!
//! # Concurrency
//!
//! Submissions arrive synchronously on the UI thread; completions arrive
//! on the runtime. Both serialize on one mutex guarding the queue, the
//! controller state, and the saving flag. Critical sections are pure
//! data-structure mutation plus observer callbacks; the network operation
//! itself runs in a spawned task outside the lock, with only the captured
//! task value in.
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
//! let controller = SyncController::new(Arc::new(HttpStore), Arc::new(NoopObserver));
//!
//! controller.submit_upsert(
//!     AnnotationId::new("note-1"),
//!     AnnotationPayload::new(serde_json::json!({ "contents": "highlight p.3" })),
//! );
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::annotation::{AnnotationId, AnnotationPayload};
use crate::error::SyncError;
use crate::observer::SyncObserver;
use crate::store::AnnotationStore;

use super::queue::TaskQueue;
use super::task::SyncTask;

/// Drive state of the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerState {
    /// Nothing in flight; the queue may or may not be empty
    Idle,
    /// Exactly one task is executing against the store
    InFlight(SyncTask),
    /// The last operation failed with this task; draining is halted until
    /// a retry or a new edit. The task (or a newer edit superseding it)
    /// sits at the queue head.
    Paused(SyncTask),
}

impl ControllerState {
    /// Whether the controller is paused after a failure
    pub fn is_paused(&self) -> bool {
        matches!(self, ControllerState::Paused(_))
    }

    /// Whether a store operation is currently executing
    pub fn is_in_flight(&self) -> bool {
        matches!(self, ControllerState::InFlight(_))
    }
}

/// Snapshot of the controller for status surfaces
#[derive(Debug, Clone)]
pub struct SyncStatus {
    /// Whether a saving-started notification is outstanding
    pub is_saving: bool,
    /// Whether the controller is paused after a failure
    pub is_paused: bool,
    /// Number of pending tasks, not counting one in flight
    pub pending: usize,
    /// Most recent failure, if any
    pub last_error: Option<SyncError>,
    /// When the most recent failure happened
    pub last_failure_at: Option<DateTime<Utc>>,
}

struct Failure {
    error: SyncError,
    at: DateTime<Utc>,
}

struct Inner {
    queue: TaskQueue,
    state: ControllerState,
    /// Whether a saving-started notification has been emitted and not yet
    /// matched by a saving-finished one. Stays set across a pause so the
    /// UI keeps showing unsaved work.
    saving: bool,
    last_failure: Option<Failure>,
}

struct Shared {
    store: Arc<dyn AnnotationStore>,
    observer: Arc<dyn SyncObserver>,
    runtime: Handle,
    inner: Mutex<Inner>,
}

/// Serializes annotation edits into an ordered stream of store operations.
///
/// One controller exists per open document session. Cloning yields another
/// handle to the same session.
#[derive(Clone)]
pub struct SyncController {
    shared: Arc<Shared>,
}

impl SyncController {
    /// Create a controller on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime context; construct with
    /// [`with_runtime`](Self::with_runtime) from non-runtime threads.
    pub fn new(store: Arc<dyn AnnotationStore>, observer: Arc<dyn SyncObserver>) -> Self {
        Self::with_runtime(store, observer, Handle::current())
    }

    /// Create a controller that spawns its store operations on the given
    /// runtime handle
    pub fn with_runtime(
        store: Arc<dyn AnnotationStore>,
        observer: Arc<dyn SyncObserver>,
        runtime: Handle,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                observer,
                runtime,
                inner: Mutex::new(Inner {
                    queue: TaskQueue::new(),
                    state: ControllerState::Idle,
                    saving: false,
                    last_failure: None,
                }),
            }),
        }
    }

    /// Queue the latest state of an annotation and start draining if the
    /// controller is idle. A submission while paused counts as an implicit
    /// retry.
    pub fn submit_upsert(&self, id: AnnotationId, payload: AnnotationPayload) {
        {
            let mut inner = self.shared.inner.lock();
            inner.queue.put(id, payload);
            Self::clear_pause(&mut inner);
        }
        self.process_next();
    }

    /// Queue the removal of an annotation; otherwise identical to
    /// [`submit_upsert`](Self::submit_upsert)
    pub fn submit_delete(&self, id: AnnotationId) {
        {
            let mut inner = self.shared.inner.lock();
            inner.queue.delete(id);
            Self::clear_pause(&mut inner);
        }
        self.process_next();
    }

    /// Resume draining after a failure without requiring a new edit
    pub fn retry(&self) {
        {
            let mut inner = self.shared.inner.lock();
            if let ControllerState::Paused(task) = &inner.state {
                tracing::info!("retrying sync for annotation {}", task.id());
                inner.state = ControllerState::Idle;
            }
        }
        self.process_next();
    }

    /// Snapshot the controller for a status surface
    pub fn status(&self) -> SyncStatus {
        let inner = self.shared.inner.lock();
        SyncStatus {
            is_saving: inner.saving,
            is_paused: inner.state.is_paused(),
            pending: inner.queue.len(),
            last_error: inner.last_failure.as_ref().map(|f| f.error.clone()),
            last_failure_at: inner.last_failure.as_ref().map(|f| f.at),
        }
    }

    /// Number of pending tasks, not counting one in flight
    pub fn pending(&self) -> usize {
        self.shared.inner.lock().queue.len()
    }

    /// Current drive state
    pub fn state(&self) -> ControllerState {
        self.shared.inner.lock().state.clone()
    }

    fn clear_pause(inner: &mut Inner) {
        if let ControllerState::Paused(task) = &inner.state {
            tracing::debug!(
                "new edit while paused, resuming sync (failed task was {} for {})",
                task.kind(),
                task.id()
            );
            inner.state = ControllerState::Idle;
        }
    }

    /// Take the next task and dispatch it, unless something is already in
    /// flight or the controller is paused.
    fn process_next(&self) {
        let task = {
            let mut inner = self.shared.inner.lock();
            match inner.state {
                ControllerState::InFlight(_) | ControllerState::Paused(_) => return,
                ControllerState::Idle => {}
            }
            let Some(task) = inner.queue.take_next() else {
                if inner.saving {
                    inner.saving = false;
                    self.shared.observer.saving_state_changed(false);
                }
                return;
            };
            if !inner.saving {
                inner.saving = true;
                self.shared.observer.saving_state_changed(true);
            }
            inner.state = ControllerState::InFlight(task.clone());
            task
        };
        self.dispatch(task);
    }

    /// Run the store operation for one task on the runtime, outside the
    /// state lock
    fn dispatch(&self, task: SyncTask) {
        let controller = self.clone();
        self.shared.runtime.spawn(async move {
            tracing::debug!("executing {} for annotation {}", task.kind(), task.id());
            let result = match &task {
                SyncTask::Upsert { id, payload } => controller
                    .shared
                    .store
                    .upsert(id, payload.clone())
                    .await
                    .map(|_| ()),
                SyncTask::Delete { id } => controller.shared.store.delete(id).await,
            };
            controller.complete(task, result);
        });
    }

    /// Apply the outcome of an in-flight task
    fn complete(&self, task: SyncTask, result: Result<(), SyncError>) {
        match result {
            Ok(()) => {
                tracing::debug!("synced {} for annotation {}", task.kind(), task.id());
                {
                    let mut inner = self.shared.inner.lock();
                    inner.state = ControllerState::Idle;
                }
                self.process_next();
            }
            Err(error) => {
                tracing::warn!(
                    "sync of annotation {} failed, pausing: {} ({} pending)",
                    task.id(),
                    error,
                    self.pending()
                );
                let mut inner = self.shared.inner.lock();
                inner.queue.put_back(task.clone());
                inner.last_failure = Some(Failure {
                    error: error.clone(),
                    at: Utc::now(),
                });
                match (&error, &task) {
                    (SyncError::PayloadTooLarge, SyncTask::Upsert { payload, .. }) => {
                        tracing::warn!(
                            "annotation {} rejected at {} bytes",
                            task.id(),
                            payload.byte_len()
                        );
                        self.shared.observer.payload_too_large(payload);
                    }
                    _ => self.shared.observer.save_failed(&error),
                }
                inner.state = ControllerState::Paused(task);
            }
        }
    }
}
