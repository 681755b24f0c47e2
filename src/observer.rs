//! Save-State Notifications
//!
//! This module defines the callback interface through which the sync core
//! reports progress back to the UI edit source.
//!
//! # Delivery
//!
//! Notifications are fire-and-forget and are delivered on whatever thread
//! happens to drive the state transition (the UI thread for a first edit,
//! the runtime for a completion). Observers that touch UI state are
//! responsible for marshaling back to the UI thread themselves, so every
//! callback must return quickly and must not call back into the
//! controller.

use crate::annotation::AnnotationPayload;
use crate::error::SyncError;

/// Receiver for save-state changes and failures raised by the sync core
pub trait SyncObserver: Send + Sync {
    /// The controller started saving (`true`) or drained the queue with
    /// nothing left in flight (`false`). Fired once per transition; bursts
    /// of edits while already saving do not re-fire `true`.
    fn saving_state_changed(&self, is_saving: bool);

    /// An operation failed for a reason other than the size limit. The
    /// controller is paused until [`retry`](crate::sync::SyncController::retry)
    /// or a new edit.
    fn save_failed(&self, error: &SyncError);

    /// The store rejected this annotation body as too large. The
    /// controller is paused; the user has to trim content before a retry
    /// can succeed.
    fn payload_too_large(&self, payload: &AnnotationPayload);
}

/// Observer that discards every notification, for sessions without a
/// listening UI surface
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {
    fn saving_state_changed(&self, _is_saving: bool) {}

    fn save_failed(&self, _error: &SyncError) {}

    fn payload_too_large(&self, _payload: &AnnotationPayload) {}
}
