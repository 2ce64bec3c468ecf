//! PostgreSQL document store.
//!
//! Each collection is a table of `(id UUID, seq BIGSERIAL, doc JSONB)`.
//! Filters are translated to JSONB operators with every value bound as a
//! query parameter; only the table name (from [`Collection::table`]) is
//! spliced into the SQL text.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use super::{
    Collection, Condition, DeleteResult, Document, DocumentStore, Filter, ID_FIELD,
    InsertOneResult, Sort, SortDirection, StoreError, UpdateResult,
};
use crate::db::DbPool;

/// A row as stored: identifier column plus the JSONB body.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    doc: Json<Document>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        let mut document = row.doc.0;
        document.insert(ID_FIELD.to_string(), row.id.to_string().into());
        document
    }
}

pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so the needle is matched literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append ` WHERE ...` for `filter`. Always emits a WHERE clause.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    qb.push(" WHERE TRUE");

    if let Some(id) = filter.id {
        qb.push(" AND id = ").push_bind(id);
    }

    for condition in &filter.conditions {
        match condition {
            Condition::Eq { field, value } => {
                qb.push(" AND doc -> ")
                    .push_bind(field.clone())
                    .push(" = ")
                    .push_bind(Json(value.clone()));
            }
            Condition::ContainsIgnoreCase { field, needle } => {
                qb.push(" AND jsonb_typeof(doc -> ")
                    .push_bind(field.clone())
                    .push(") = 'string' AND doc ->> ")
                    .push_bind(field.clone())
                    .push(" ILIKE ")
                    .push_bind(format!("%{}%", escape_like(needle)));
            }
        }
    }
}

fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sort: Option<&Sort>) {
    match sort {
        Some(sort) => {
            qb.push(" ORDER BY doc -> ")
                .push_bind(sort.field.clone())
                .push(match sort.direction {
                    SortDirection::Ascending => " ASC NULLS LAST",
                    SortDirection::Descending => " DESC NULLS FIRST",
                })
                // Ties keep insertion order
                .push(", seq");
        }
        None => {
            qb.push(" ORDER BY seq");
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> Result<Vec<Document>, StoreError> {
        let mut qb = QueryBuilder::new(format!("SELECT id, doc FROM {}", collection.table()));
        push_filter(&mut qb, filter);
        push_order(&mut qb, sort);

        let rows: Vec<DocumentRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut qb = QueryBuilder::new(format!("SELECT id, doc FROM {}", collection.table()));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY seq LIMIT 1");

        let row: Option<DocumentRow> = qb.build_query_as().fetch_optional(&self.pool).await?;

        Ok(row.map(Into::into))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOneResult, StoreError> {
        // The identifier is ours to assign
        document.remove(ID_FIELD);
        let id = Uuid::new_v4();

        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", collection.table());
        sqlx::query(&sql)
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await?;

        Ok(InsertOneResult::new(id))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        mut set: Document,
    ) -> Result<UpdateResult, StoreError> {
        set.remove(ID_FIELD);
        let table = collection.table();

        // `target` is the first match; `updated` only contains it when the
        // merge actually changes the stored document.
        let mut qb = QueryBuilder::new(format!("WITH target AS (SELECT id, doc FROM {table}"));
        push_filter(&mut qb, filter);
        qb.push(format!(
            " ORDER BY seq LIMIT 1 FOR UPDATE), updated AS (UPDATE {table} SET doc = {table}.doc || "
        ));
        qb.push_bind(Json(set.clone()));
        qb.push(format!(
            " FROM target WHERE {table}.id = target.id AND (target.doc || "
        ));
        qb.push_bind(Json(set));
        qb.push(
            ") <> target.doc RETURNING 1) \
             SELECT (SELECT COUNT(*) FROM target), (SELECT COUNT(*) FROM updated)",
        );

        let (matched, modified): (i64, i64) = qb.build_query_as().fetch_one(&self.pool).await?;

        Ok(UpdateResult::new(matched as u64, modified as u64))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteResult, StoreError> {
        let table = collection.table();

        let mut qb = QueryBuilder::new(format!(
            "DELETE FROM {table} WHERE id = (SELECT id FROM {table}"
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY seq LIMIT 1)");

        let result = qb.build().execute(&self.pool).await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("oil"), "oil");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn filter_sql_binds_every_value() {
        let filter = Filter::by_id(Uuid::nil())
            .eq("email", "a@b.com")
            .contains_ignore_case("title", "oil");

        let mut qb = QueryBuilder::<Postgres>::new("SELECT id, doc FROM orders");
        push_filter(&mut qb, &filter);

        assert_eq!(
            qb.sql(),
            "SELECT id, doc FROM orders WHERE TRUE AND id = $1 AND doc -> $2 = $3 \
             AND jsonb_typeof(doc -> $4) = 'string' AND doc ->> $5 ILIKE $6"
        );
    }

    #[test]
    fn order_clause_follows_direction() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id, doc FROM services");
        push_order(
            &mut qb,
            Some(&Sort::new("price", SortDirection::Descending)),
        );
        assert_eq!(
            qb.sql(),
            "SELECT id, doc FROM services ORDER BY doc -> $1 DESC NULLS FIRST, seq"
        );

        let mut qb = QueryBuilder::<Postgres>::new("SELECT id, doc FROM services");
        push_order(&mut qb, None);
        assert_eq!(qb.sql(), "SELECT id, doc FROM services ORDER BY seq");
    }
}
