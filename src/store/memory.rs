//! In-process document store.
//!
//! Mirrors the PostgreSQL store: identifiers are assigned on insertion,
//! unsorted results come back in insertion order, and `_one` operations
//! target the first match. String sort order is bytewise rather than
//! collation-aware (see [`Sort::compare`](crate::store::Sort::compare)).

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    Collection, DeleteResult, Document, DocumentStore, Filter, ID_FIELD, InsertOneResult, Sort,
    StoreError, UpdateResult,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;

        let mut documents: Vec<Document> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default();

        // Stable, so ties keep insertion order
        if let Some(sort) = sort {
            documents.sort_by(|a, b| sort.compare(a, b));
        }

        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOneResult, StoreError> {
        let id = Uuid::new_v4();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document);

        Ok(InsertOneResult::new(id))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        mut set: Document,
    ) -> Result<UpdateResult, StoreError> {
        // Identifiers never change
        set.remove(ID_FIELD);

        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(UpdateResult::new(0, 0));
        };

        let mut modified = false;
        for (field, value) in set {
            if document.get(&field) != Some(&value) {
                document.insert(field, value);
                modified = true;
            }
        }

        Ok(UpdateResult::new(1, u64::from(modified)))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError> {
        let mut collections = self.collections.write().await;

        let position = collections
            .get(&collection)
            .and_then(|docs| docs.iter().position(|d| filter.matches(d)));

        match (position, collections.get_mut(&collection)) {
            (Some(index), Some(docs)) => {
                docs.remove(index);
                Ok(DeleteResult::new(1))
            }
            _ => Ok(DeleteResult::new(0)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}
