//! Coalescing Task Queue
//!
//! Holds the pending sync tasks for one document session, keyed by
//! annotation identity.
//!
//! # Invariants
//!
//! - **One task per identity**: enqueuing for an identity that already has
//!   a pending task replaces that task in place, so a burst of edits to
//!   the same annotation collapses into a single operation carrying only
//!   the latest value.
//! - **First-touch ordering**: a coalesced identity keeps the queue slot
//!   of its first edit. Repeated edits to one annotation neither starve
//!   other annotations nor jump ahead of them.
//!
//! # Ownership
//!
//! The queue is a plain data structure with no lock of its own; it is
//! owned exclusively by the [`SyncController`](super::SyncController) and
//! mutated only inside the controller's critical sections.

use std::collections::VecDeque;

use crate::annotation::{AnnotationId, AnnotationPayload};

use super::task::{QueuedTask, SyncTask};

/// Pending sync tasks, FIFO by first-enqueue among pending identities
#[derive(Debug, Default)]
pub struct TaskQueue {
    entries: VecDeque<QueuedTask>,
}

impl TaskQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the latest state of an annotation, superseding any pending
    /// task for the same identity
    pub fn put(&mut self, id: AnnotationId, payload: AnnotationPayload) {
        self.enqueue(SyncTask::Upsert { id, payload });
    }

    /// Queue the removal of an annotation, superseding any pending task
    /// for the same identity
    pub fn delete(&mut self, id: AnnotationId) {
        self.enqueue(SyncTask::Delete { id });
    }

    /// Pop the next task to execute, or `None` if nothing is pending
    pub fn take_next(&mut self) -> Option<SyncTask> {
        self.entries.pop_front().map(|entry| entry.task)
    }

    /// Re-insert a failed task at the head so it retries before anything
    /// newer.
    ///
    /// If the identity picked up a fresh pending task while this one was
    /// in flight, the put-back is discarded: the pending task was enqueued
    /// after this one was taken and strictly supersedes it. Returns
    /// whether the task was kept.
    pub fn put_back(&mut self, task: SyncTask) -> bool {
        if self.contains(task.id()) {
            tracing::debug!(
                "dropping put-back of superseded {} for annotation {}",
                task.kind(),
                task.id()
            );
            return false;
        }
        self.entries.push_front(QueuedTask::new(task));
        true
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the identity has a pending task
    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.entries.iter().any(|entry| entry.task.id() == id)
    }

    /// Drop every pending task (session teardown)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pending tasks in execution order
    pub fn tasks(&self) -> impl Iterator<Item = &SyncTask> {
        self.entries.iter().map(|entry| &entry.task)
    }

    fn enqueue(&mut self, task: SyncTask) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.task.id() == task.id())
        {
            Some(entry) => {
                // Keeps the first-touch slot and the original queued_at.
                tracing::debug!(
                    "coalesced {} for annotation {} into pending slot",
                    task.kind(),
                    task.id()
                );
                entry.task = task;
            }
            None => {
                tracing::debug!("queued {} for annotation {}", task.kind(), task.id());
                self.entries.push_back(QueuedTask::new(task));
            }
        }
    }
}
