//! Read-only snapshot backend.
//!
//! Serves entity lists from `{dir}/{Entity}s.json` files exported from the
//! marketplace. Mutations are acknowledged but never persisted, so the
//! console stays fully navigable on a local snapshot.

use std::path::PathBuf;

use cardvault_core::EntityKind;
use serde_json::{Value, json};

use super::{ApiError, Op};

pub(super) struct SnapshotBackend {
    dir: PathBuf,
}

impl SnapshotBackend {
    pub(super) const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub(super) async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, ApiError> {
        let path = self.dir.join(kind.snapshot_file());
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| ApiError::Snapshot {
                entity: kind.name(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Parse {
            entity: kind.name(),
            source,
        })
    }

}

/// Acknowledge a write without persisting it.
pub(super) fn mock_mutation(kind: EntityKind, op: Op) -> Value {
    tracing::warn!(
        entity = kind.name(),
        op = %op,
        "snapshot backend is read-only; acknowledging mutation without persisting"
    );
    json!({"success": true, "mock": true})
}
