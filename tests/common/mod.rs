//! Shared test helpers: a scriptable annotation store and a recording
//! observer.
//!
//! [`ScriptedStore`] records every call the controller makes and holds
//! each one at a gate until the test releases it, so tests can interleave
//! UI submissions with in-flight operations deterministically.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use annosync::{AnnotationId, AnnotationPayload, AnnotationStore, SyncError, SyncObserver};

/// One call the controller made against the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Upsert {
        id: String,
        payload: AnnotationPayload,
    },
    Delete {
        id: String,
    },
}

/// Store whose outcomes are scripted by the test.
///
/// Every call is recorded, then blocks on the gate until the test grants
/// a permit via [`allow`](Self::allow). On release it completes with the
/// next scripted result, defaulting to success.
pub struct ScriptedStore {
    calls: Mutex<Vec<StoreCall>>,
    results: Mutex<VecDeque<Result<(), SyncError>>>,
    gate: Semaphore,
}

impl ScriptedStore {
    /// Store whose calls block until explicitly released
    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            results: Mutex::new(VecDeque::new()),
            gate: Semaphore::new(0),
        })
    }

    /// Store whose calls complete immediately
    pub fn open() -> Arc<Self> {
        let store = Self::gated();
        store.allow(10_000);
        store
    }

    /// Let `n` further calls complete
    pub fn allow(&self, n: usize) {
        self.gate.add_permits(n);
    }

    /// Script the outcome of the next unscripted call (success otherwise)
    pub fn push_result(&self, result: Result<(), SyncError>) {
        self.results.lock().push_back(result);
    }

    /// Calls seen so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Number of calls seen so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    async fn run(&self, call: StoreCall) -> Result<(), SyncError> {
        self.calls.lock().push(call);
        let permit = self.gate.acquire().await.expect("gate closed");
        permit.forget();
        self.results.lock().pop_front().unwrap_or(Ok(()))
    }
}

#[async_trait]
impl AnnotationStore for ScriptedStore {
    async fn upsert(
        &self,
        id: &AnnotationId,
        payload: AnnotationPayload,
    ) -> Result<AnnotationPayload, SyncError> {
        self.run(StoreCall::Upsert {
            id: id.as_str().to_owned(),
            payload: payload.clone(),
        })
        .await
        .map(|_| payload)
    }

    async fn delete(&self, id: &AnnotationId) -> Result<(), SyncError> {
        self.run(StoreCall::Delete {
            id: id.as_str().to_owned(),
        })
        .await
    }
}

/// One notification the controller raised
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Saving(bool),
    Failed(SyncError),
    TooLarge(AnnotationPayload),
}

/// Observer that records every notification in order
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Notification>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All notifications seen so far, in order
    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().clone()
    }

    /// Just the saving-state transitions, in order
    pub fn saving_transitions(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Notification::Saving(on) => Some(on),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, event: &Notification) -> bool {
        self.events.lock().contains(event)
    }
}

impl SyncObserver for RecordingObserver {
    fn saving_state_changed(&self, is_saving: bool) {
        self.events.lock().push(Notification::Saving(is_saving));
    }

    fn save_failed(&self, error: &SyncError) {
        self.events.lock().push(Notification::Failed(error.clone()));
    }

    fn payload_too_large(&self, payload: &AnnotationPayload) {
        self.events.lock().push(Notification::TooLarge(payload.clone()));
    }
}

/// Shorthand for test identities
pub fn id(s: &str) -> AnnotationId {
    AnnotationId::new(s)
}

/// Shorthand for test payloads
pub fn payload(s: &str) -> AnnotationPayload {
    AnnotationPayload::new(serde_json::json!({ "contents": s }))
}

/// Poll until the condition holds, panicking after a grace period
pub async fn wait_for(mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met within timeout");
}
