//! Entity access layer for the console.
//!
//! Every admin page reads and writes marketplace entities through
//! [`EntityClient`]. The client fronts one of two backends: the live
//! marketplace REST API, or read-only JSON snapshots on disk for local
//! work without marketplace credentials. Entity lists are cached per
//! [`EntityKind`] with a short TTL and invalidated on every mutation so
//! pages always re-render fresh data after a write.

mod rest;
mod snapshot;

use std::sync::Arc;

use cardvault_core::EntityKind;
use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config::{BackendConfig, ConsoleConfig};
use rest::RestBackend;
use snapshot::SnapshotBackend;

/// A CRUD operation, named for error reporting and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Create,
    Update,
    Delete,
}

impl Op {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the entity access layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The marketplace API answered with a non-success status.
    #[error("{op} {entity} failed with status {status}")]
    RequestFailed {
        entity: &'static str,
        op: Op,
        status: reqwest::StatusCode,
    },

    /// The request could not be sent or the response body not read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response or snapshot file was not the expected JSON shape.
    #[error("invalid JSON for {entity}: {source}")]
    Parse {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A snapshot file could not be read.
    #[error("snapshot read failed for {entity}: {source}")]
    Snapshot {
        entity: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The configured base URL cannot address this entity collection.
    #[error("cannot build {entity} URL: {source}")]
    InvalidUrl {
        entity: &'static str,
        #[source]
        source: url::ParseError,
    },
}

enum Backend {
    Rest(RestBackend),
    Snapshot(SnapshotBackend),
}

impl Backend {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, ApiError> {
        match self {
            Self::Rest(rest) => rest.list(kind).await,
            Self::Snapshot(snap) => snap.list(kind).await,
        }
    }

    async fn create(&self, kind: EntityKind, data: Value) -> Result<Value, ApiError> {
        match self {
            Self::Rest(rest) => rest.create(kind, data).await,
            Self::Snapshot(_) => Ok(snapshot::mock_mutation(kind, Op::Create)),
        }
    }

    async fn update(&self, kind: EntityKind, id: &str, data: Value) -> Result<Value, ApiError> {
        match self {
            Self::Rest(rest) => rest.update(kind, id, data).await,
            Self::Snapshot(_) => Ok(snapshot::mock_mutation(kind, Op::Update)),
        }
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<Value, ApiError> {
        match self {
            Self::Rest(rest) => rest.delete(kind, id).await,
            Self::Snapshot(_) => Ok(snapshot::mock_mutation(kind, Op::Delete)),
        }
    }
}

struct ClientInner {
    backend: Backend,
    writable: bool,
    lists: Cache<EntityKind, Arc<Vec<Value>>>,
}

/// Cheap-to-clone handle over the entity backend and list cache.
#[derive(Clone)]
pub struct EntityClient {
    inner: Arc<ClientInner>,
}

impl EntityClient {
    /// Build a client for the configured backend.
    #[must_use]
    pub fn new(config: &ConsoleConfig) -> Self {
        let backend = match &config.backend {
            BackendConfig::Rest { base_url, token } => {
                Backend::Rest(RestBackend::new(base_url.clone(), token.clone()))
            }
            BackendConfig::Snapshot { dir } => Backend::Snapshot(SnapshotBackend::new(dir.clone())),
        };

        let lists = Cache::builder()
            .max_capacity(EntityKind::ALL.len() as u64)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(ClientInner {
                writable: config.backend.writable(),
                backend,
                lists,
            }),
        }
    }

    /// Scoped handle for one entity kind.
    #[must_use]
    pub fn entity(&self, kind: EntityKind) -> EntityApi {
        EntityApi {
            client: self.clone(),
            kind,
        }
    }

    /// Whether mutations are persisted by the backend.
    #[must_use]
    pub fn writable(&self) -> bool {
        self.inner.writable
    }
}

/// CRUD operations for a single entity kind.
#[derive(Clone)]
pub struct EntityApi {
    client: EntityClient,
    kind: EntityKind,
}

impl EntityApi {
    /// List all records, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the backend fetch fails on a cache miss.
    pub async fn list(&self) -> Result<Arc<Vec<Value>>, ApiError> {
        let inner = &self.client.inner;
        if let Some(cached) = inner.lists.get(&self.kind).await {
            return Ok(cached);
        }
        let fresh = Arc::new(inner.backend.list(self.kind).await?);
        inner.lists.insert(self.kind, Arc::clone(&fresh)).await;
        Ok(fresh)
    }

    /// List all records deserialized into the typed entity model.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the fetch fails or a record does not
    /// deserialize.
    pub async fn list_as<T: DeserializeOwned>(&self) -> Result<Vec<T>, ApiError> {
        let raw = self.list().await?;
        raw.iter()
            .map(|record| {
                serde_json::from_value(record.clone()).map_err(|source| ApiError::Parse {
                    entity: self.kind.name(),
                    source,
                })
            })
            .collect()
    }

    /// Fetch a single record by id, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the underlying list fetch fails.
    pub async fn get(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let records = self.list().await?;
        Ok(records
            .iter()
            .find(|record| record.get("id").and_then(Value::as_str) == Some(id))
            .cloned())
    }

    /// Typed variant of [`Self::get`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the fetch fails or the record does not
    /// deserialize.
    pub async fn get_as<T: DeserializeOwned>(&self, id: &str) -> Result<Option<T>, ApiError> {
        match self.get(id).await? {
            Some(record) => serde_json::from_value(record)
                .map(Some)
                .map_err(|source| ApiError::Parse {
                    entity: self.kind.name(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Create a record and invalidate the cached list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the backend rejects the write.
    pub async fn create(&self, data: Value) -> Result<Value, ApiError> {
        let inner = &self.client.inner;
        let created = inner.backend.create(self.kind, data).await?;
        inner.lists.invalidate(&self.kind).await;
        Ok(created)
    }

    /// Update a record and invalidate the cached list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the backend rejects the write.
    pub async fn update(&self, id: &str, data: Value) -> Result<Value, ApiError> {
        let inner = &self.client.inner;
        let updated = inner.backend.update(self.kind, id, data).await?;
        inner.lists.invalidate(&self.kind).await;
        Ok(updated)
    }

    /// Delete a record and invalidate the cached list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the backend rejects the write.
    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        let inner = &self.client.inner;
        let deleted = inner.backend.delete(self.kind, id).await?;
        inner.lists.invalidate(&self.kind).await;
        Ok(deleted)
    }

    /// Whether mutations are persisted by the backend.
    #[must_use]
    pub fn writable(&self) -> bool {
        self.client.writable()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;

    fn snapshot_client(dir: PathBuf) -> EntityClient {
        EntityClient::new(&ConsoleConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            backend: BackendConfig::Snapshot { dir },
            cache_ttl: Duration::from_secs(30),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        })
    }

    fn write_snapshot(dir: &std::path::Path, file: &str, body: &str) {
        std::fs::write(dir.join(file), body).unwrap();
    }

    #[tokio::test]
    async fn test_snapshot_list_and_get() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(
            dir.path(),
            "Users.json",
            r#"[{"id": "u1", "email": "a@b.c"}, {"id": "u2", "email": "d@e.f"}]"#,
        );

        let client = snapshot_client(dir.path().to_path_buf());
        let users = client.entity(EntityKind::User);

        let all = users.list().await.unwrap();
        assert_eq!(all.len(), 2);

        let found = users.get("u2").await.unwrap().unwrap();
        assert_eq!(found["email"], "d@e.f");
        assert!(users.get("u3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_mutations_are_acknowledged_mocks() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "Users.json", r#"[{"id": "u1"}]"#);

        let client = snapshot_client(dir.path().to_path_buf());
        let users = client.entity(EntityKind::User);
        assert!(!users.writable());

        let res = users
            .update("u1", serde_json::json!({"is_suspended": true}))
            .await
            .unwrap();
        assert_eq!(res["success"], true);
        assert_eq!(res["mock"], true);

        // The snapshot file itself is untouched.
        let after = users.list().await.unwrap();
        assert_eq!(after.len(), 1);
        assert!(after[0].get("is_suspended").is_none());
    }

    #[tokio::test]
    async fn test_list_is_cached_until_mutation() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "Orders.json", r#"[{"id": "o1"}]"#);

        let client = snapshot_client(dir.path().to_path_buf());
        let orders = client.entity(EntityKind::Order);

        assert_eq!(orders.list().await.unwrap().len(), 1);

        // Rewrite the file; the cached list still serves the old contents.
        write_snapshot(dir.path(), "Orders.json", r#"[{"id": "o1"}, {"id": "o2"}]"#);
        assert_eq!(orders.list().await.unwrap().len(), 1);

        // Any mutation invalidates the cache and the next list re-reads.
        orders.delete("o1").await.unwrap();
        assert_eq!(orders.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = snapshot_client(dir.path().to_path_buf());

        let err = client.entity(EntityKind::Dispute).list().await.unwrap_err();
        assert!(matches!(err, ApiError::Snapshot { entity: "Dispute", .. }));
    }

    #[tokio::test]
    async fn test_list_as_deserializes_typed_records() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(
            dir.path(),
            "SupportTickets.json",
            r#"[{"id": "t1", "subject": "Refund", "priority": "urgent"}]"#,
        );

        let client = snapshot_client(dir.path().to_path_buf());
        let tickets: Vec<cardvault_core::SupportTicket> = client
            .entity(EntityKind::SupportTicket)
            .list_as()
            .await
            .unwrap();

        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].subject, "Refund");
        assert_eq!(tickets[0].priority, cardvault_core::TicketPriority::Urgent);
    }
}
