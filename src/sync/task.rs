//! Sync Task Types
//!
//! A [`SyncTask`] is one pending write against the remote annotation
//! store: either the fully-specified desired state of an annotation, or a
//! request to remove it. Tasks are the unit of coalescing (keyed by
//! identity) and of execution (one network operation each).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::annotation::{AnnotationId, AnnotationPayload};

/// One pending operation against the remote annotation store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncTask {
    /// Write the annotation's latest state
    Upsert {
        /// Annotation identity
        id: AnnotationId,
        /// Desired annotation state
        payload: AnnotationPayload,
    },
    /// Remove the annotation
    Delete {
        /// Annotation identity
        id: AnnotationId,
    },
}

impl SyncTask {
    /// Identity this task targets, used as the coalescing key
    pub fn id(&self) -> &AnnotationId {
        match self {
            SyncTask::Upsert { id, .. } => id,
            SyncTask::Delete { id } => id,
        }
    }

    /// Short operation name for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            SyncTask::Upsert { .. } => "upsert",
            SyncTask::Delete { .. } => "delete",
        }
    }
}

/// Queue entry wrapping a task with diagnostic metadata
#[derive(Debug, Clone)]
pub(crate) struct QueuedTask {
    /// The pending operation
    pub task: SyncTask,
    /// When the identity first entered the queue; diagnostic only, never
    /// consulted for ordering
    pub queued_at: DateTime<Utc>,
}

impl QueuedTask {
    pub fn new(task: SyncTask) -> Self {
        Self {
            task,
            queued_at: Utc::now(),
        }
    }
}
