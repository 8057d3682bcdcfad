//! Participant store double whose calls can be made to fail or to block
//! until the test releases them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use matchroom::domain::{ResultRow, SessionId, UserId};
use matchroom::{InMemoryParticipantStore, ParticipantStore, StoreError};
use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    GetGameId,
    SetGameId,
    Append,
    ReadRows,
}

/// Handshake for one blocked store call.
#[derive(Debug, Default)]
pub struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    /// Wait until the gated call is parked inside the store.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the parked call continue.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Default)]
pub struct ScriptedStore {
    inner: InMemoryParticipantStore,
    failing: Mutex<HashMap<StoreOp, usize>>,
    gates: Mutex<HashMap<StoreOp, Arc<Gate>>>,
    /// Appends are acknowledged but not kept.
    lose_appends: Mutex<bool>,
}

impl ScriptedStore {
    pub fn new(inner: InMemoryParticipantStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Fail the next `times` calls of `op`.
    pub fn fail_next(&self, op: StoreOp, times: usize) {
        self.failing.lock().insert(op, times);
    }

    /// Block the next call of `op` until the returned gate is released.
    pub fn gate_next(&self, op: StoreOp) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.lock().insert(op, gate.clone());
        gate
    }

    pub fn lose_appends(&self) {
        *self.lose_appends.lock() = true;
    }

    pub fn result_row_count(&self) -> usize {
        self.inner.result_row_count()
    }

    async fn script(&self, op: StoreOp) -> Result<(), StoreError> {
        let gate = self.gates.lock().remove(&op);
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let mut failing = self.failing.lock();
        match failing.get_mut(&op) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(StoreError::Unavailable(format!("scripted {op:?} failure")))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ParticipantStore for ScriptedStore {
    async fn get_game_id(&self, user: UserId) -> Result<Option<String>, StoreError> {
        self.script(StoreOp::GetGameId).await?;
        self.inner.get_game_id(user).await
    }

    async fn set_game_id(&self, user: UserId, game_id: &str) -> Result<(), StoreError> {
        self.script(StoreOp::SetGameId).await?;
        self.inner.set_game_id(user, game_id).await
    }

    async fn append_result_row(&self, row: ResultRow) -> Result<(), StoreError> {
        self.script(StoreOp::Append).await?;
        if *self.lose_appends.lock() {
            return Ok(());
        }
        self.inner.append_result_row(row).await
    }

    async fn get_result_rows(&self, session_id: &SessionId) -> Result<Vec<ResultRow>, StoreError> {
        self.script(StoreOp::ReadRows).await?;
        self.inner.get_result_rows(session_id).await
    }
}
