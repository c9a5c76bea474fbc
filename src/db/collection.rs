//! Generic per-collection document access.
//!
//! Every document type lives in the shared `documents` table, scoped by its
//! collection name. Each method is a single statement; nothing here spans
//! more than one round trip or takes a transaction.

use chrono::Utc;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

use super::StoreError;
use crate::domain::{DocumentId, Patch, Ref};
use crate::entities::documents;

/// A document type stored in its own collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;
}

/// A document together with the id it is stored under.
///
/// Serializes flat, with the external id string in an `id` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<T> {
    pub id: DocumentId,
    #[serde(flatten)]
    pub doc: T,
}

/// Equality constraints on top-level document fields.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
    exclude: Option<DocumentId>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.clauses.push((field.to_string(), value.into()));
        self
    }

    /// Leaves one document out of the match.
    #[must_use]
    pub const fn excluding(mut self, id: DocumentId) -> Self {
        self.exclude = Some(id);
        self
    }

    fn condition(&self, collection: &str) -> Condition {
        let mut condition =
            Condition::all().add(documents::Column::Collection.eq(collection.to_string()));

        for (field, value) in &self.clauses {
            condition = condition.add(field_matches(field, value));
        }

        if let Some(id) = self.exclude {
            condition = condition.add(documents::Column::Id.ne(id.to_string()));
        }

        condition
    }
}

fn field_matches(field: &str, value: &Value) -> SimpleExpr {
    let path = sea_orm::Value::from(format!("$.{field}"));
    let eq = "json_extract(body, ?) = ?";

    match value {
        Value::Null => Expr::cust_with_values("json_extract(body, ?) IS NULL", [path]),
        // json_extract yields 1/0 for JSON booleans
        Value::Bool(b) => Expr::cust_with_values(eq, [path, sea_orm::Value::from(i64::from(*b))]),
        Value::Number(n) => {
            let bound = n
                .as_i64()
                .map_or_else(|| sea_orm::Value::from(n.as_f64()), sea_orm::Value::from);
            Expr::cust_with_values(eq, [path, bound])
        }
        Value::String(s) => Expr::cust_with_values(eq, [path, sea_orm::Value::from(s.clone())]),
        Value::Array(_) | Value::Object(_) => Expr::cust_with_values(
            "json_extract(body, ?) = json(?)",
            [path, sea_orm::Value::from(value.to_string())],
        ),
    }
}

pub struct Collection<T> {
    conn: DatabaseConnection,
    _doc: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self::new(self.conn.clone())
    }
}

impl<T> Collection<T> {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            _doc: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        T::COLLECTION
    }

    pub async fn insert(&self, doc: &T) -> Result<DocumentId, StoreError> {
        let id = DocumentId::new();
        let model = new_row(T::COLLECTION, id, doc)?;

        documents::Entity::insert(model)
            .exec_without_returning(&self.conn)
            .await
            .map_err(StoreError::from_db)?;

        Ok(id)
    }

    /// Inserts every document in one statement.
    pub async fn insert_many(&self, docs: &[T]) -> Result<Vec<DocumentId>, StoreError> {
        if docs.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::with_capacity(docs.len());
        let mut rows = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = DocumentId::new();
            rows.push(new_row(T::COLLECTION, id, doc)?);
            ids.push(id);
        }

        documents::Entity::insert_many(rows)
            .exec_without_returning(&self.conn)
            .await
            .map_err(StoreError::from_db)?;

        Ok(ids)
    }

    pub async fn find_by_id(&self, id: DocumentId) -> Result<Option<Stored<T>>, StoreError> {
        let row = documents::Entity::find_by_id(id.to_string())
            .filter(documents::Column::Collection.eq(T::COLLECTION))
            .one(&self.conn)
            .await?;

        row.map(decode).transpose()
    }

    /// Follows a weak reference. `None` means the target is gone or never
    /// existed.
    pub async fn resolve(&self, reference: &Ref<T>) -> Result<Option<Stored<T>>, StoreError> {
        self.find_by_id(reference.id()).await
    }

    pub async fn find_all(&self, filter: &Filter) -> Result<Vec<Stored<T>>, StoreError> {
        let rows = documents::Entity::find()
            .filter(filter.condition(T::COLLECTION))
            .order_by_asc(documents::Column::Id)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(decode).collect()
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Stored<T>>, StoreError> {
        let row = documents::Entity::find()
            .filter(filter.condition(T::COLLECTION))
            .order_by_asc(documents::Column::Id)
            .one(&self.conn)
            .await?;

        row.map(decode).transpose()
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64, StoreError> {
        let count = documents::Entity::find()
            .filter(filter.condition(T::COLLECTION))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    /// Writes exactly the fields named in `patch`.
    ///
    /// Returns the number of matched documents; `0` is the only not-found
    /// signal.
    pub async fn update_by_id(&self, id: DocumentId, patch: &Patch) -> Result<u64, StoreError> {
        if patch.is_empty() {
            let exists = self.count_by_id(id).await?;
            return Ok(exists);
        }

        let mut sql = String::from("json_set(body");
        let mut values = Vec::with_capacity(patch.len() * 2);
        for (field, value) in patch.fields() {
            sql.push_str(", ?, json(?)");
            values.push(sea_orm::Value::from(format!("$.{field}")));
            values.push(sea_orm::Value::from(value.to_string()));
        }
        sql.push(')');

        let result = documents::Entity::update_many()
            .col_expr(documents::Column::Body, Expr::cust_with_values(sql, values))
            .col_expr(documents::Column::UpdatedAt, Expr::value(Utc::now().to_rfc3339()))
            .filter(documents::Column::Id.eq(id.to_string()))
            .filter(documents::Column::Collection.eq(T::COLLECTION))
            .exec(&self.conn)
            .await
            .map_err(StoreError::from_db)?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_id(&self, id: DocumentId) -> Result<u64, StoreError> {
        let result = documents::Entity::delete_many()
            .filter(documents::Column::Id.eq(id.to_string()))
            .filter(documents::Column::Collection.eq(T::COLLECTION))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    async fn count_by_id(&self, id: DocumentId) -> Result<u64, StoreError> {
        let count = documents::Entity::find_by_id(id.to_string())
            .filter(documents::Column::Collection.eq(T::COLLECTION))
            .count(&self.conn)
            .await?;
        Ok(count)
    }
}

fn new_row<T: Serialize>(
    collection: &str,
    id: DocumentId,
    doc: &T,
) -> Result<documents::ActiveModel, StoreError> {
    let now = Utc::now().to_rfc3339();

    Ok(documents::ActiveModel {
        id: Set(id.to_string()),
        collection: Set(collection.to_string()),
        body: Set(serde_json::to_string(doc)?),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    })
}

fn decode<T: Document>(row: documents::Model) -> Result<Stored<T>, StoreError> {
    let id = DocumentId::parse(&row.id).map_err(|_| StoreError::CorruptId(row.id.clone()))?;
    let doc = serde_json::from_str(&row.body)?;
    Ok(Stored { id, doc })
}
