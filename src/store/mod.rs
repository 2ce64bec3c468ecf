//! Document storage.
//!
//! Handlers never talk to the database directly. They build a [`Filter`] and
//! call one of the [`DocumentStore`] primitives, which return documents or a
//! driver-style acknowledgment that is serialized back to the client as-is.
//!
//! Two implementations exist:
//! - [`postgres::PgDocumentStore`]: one JSONB table per collection
//! - [`memory::MemoryStore`]: process-local, used by tests and `STORAGE_BACKEND=memory`

pub mod filter;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

pub use filter::{Condition, Filter, Sort, SortDirection};

/// A stored document: a JSON object carrying its identifier under `_id`.
pub type Document = Map<String, Value>;

/// Member name under which the store exposes a document's identifier.
pub const ID_FIELD: &str = "_id";

/// The collections this server knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Orders,
}

impl Collection {
    /// Backing table name. Static, so it is safe to splice into SQL.
    pub fn table(self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Orders => "orders",
        }
    }
}

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result of `insert_one`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

/// Result of `delete_one`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Result of `update_one`.
///
/// Upserts are never performed, so `upserted_id` is always `None` and
/// `upserted_count` always 0. They are kept so the JSON matches what
/// document-database clients expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Uuid>,
    pub upserted_count: u64,
}

impl InsertOneResult {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id: None,
            upserted_count: 0,
        }
    }
}

/// Storage primitives shared by every backend.
///
/// The `_one` operations act on the first document (in insertion order)
/// matching the filter.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents matching `filter`, in insertion order unless `sort` is given.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> Result<Vec<Document>, StoreError>;

    /// First document matching `filter`, if any.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Store `document` under a freshly assigned identifier.
    ///
    /// Any `_id` supplied by the caller is discarded.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOneResult, StoreError>;

    /// Merge the members of `set` into the first matching document, leaving
    /// every other member untouched.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> Result<UpdateResult, StoreError>;

    /// Remove the first matching document. Matching nothing is not an error.
    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError>;

    /// Round-trip to the backend to prove it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release backend resources. Called once after the server stops.
    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn acknowledgments_serialize_in_camel_case() {
        let id = Uuid::nil();

        assert_eq!(
            serde_json::to_value(InsertOneResult::new(id)).unwrap(),
            json!({ "acknowledged": true, "insertedId": id })
        );
        assert_eq!(
            serde_json::to_value(DeleteResult::new(0)).unwrap(),
            json!({ "acknowledged": true, "deletedCount": 0 })
        );
        assert_eq!(
            serde_json::to_value(UpdateResult::new(1, 1)).unwrap(),
            json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 1,
                "upsertedId": null,
                "upsertedCount": 0
            })
        );
    }
}
