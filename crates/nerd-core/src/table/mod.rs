//! Resource tables
//!
//! Every persisted entity kind implements [`Resource`], which supplies its
//! table name, validation rule, statement shapes and row projections. The
//! CRUD orchestration in [`Table`] is shared by all of them and exposed to the
//! dispatcher through the object-safe [`ResourceTable`] trait.

mod card;
mod registry;
mod topic;

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use rusqlite::Connection;
use serde_json::Value;

use crate::db::{Database, Param, Record, Statement};
use crate::error::{NerdError, Result};
use crate::{bail_validation, trace_time};

pub use card::Card;
pub use registry::Registry;
pub use topic::Topic;

/// A resource as exchanged over the API: field name to value
pub type Document = serde_json::Map<String, Value>;

/// Exact-match list filter: field name to the raw string value
pub type Filter = HashMap<String, String>;

/// Per-entity specialization points
pub trait Resource: Send + Sync + 'static {
    /// Singular name used in messages, e.g. `card`
    const KIND: &'static str;

    /// Table the rows live in
    const TABLE: &'static str;

    fn validate(doc: &Document) -> Result<()>;

    fn insert_statement<'c>(conn: &'c Connection, doc: &Document) -> Result<Statement<'c>>;

    fn list_statement<'c>(conn: &'c Connection, filter: &Filter) -> Result<Statement<'c>>;

    fn get_one_statement<'c>(conn: &'c Connection, id: i64) -> Result<Statement<'c>>;

    fn update_statement<'c>(conn: &'c Connection, id: i64, doc: &Document)
        -> Result<Statement<'c>>;

    /// Projection used in listings: identity plus title/name
    fn shallow(record: &Record<'_, '_>) -> Result<Document>;

    /// Projection used for single fetches: every non-NULL column
    fn detailed(record: &Record<'_, '_>) -> Result<Document>;
}

/// CRUD operations the dispatcher can invoke on any resource kind
pub trait ResourceTable: Send + Sync {
    /// Singular name of the resource kind
    fn kind(&self) -> &'static str;

    /// Validate and persist `doc`, returning the engine-assigned id
    fn insert(&self, doc: &Document) -> Result<i64>;

    /// Shallow documents of every row matching `filter`, in scan order
    fn list(&self, filter: &Filter) -> Result<Vec<Document>>;

    /// Detailed document of the row with `id`
    fn get_one(&self, id: i64) -> Result<Document>;

    /// Replace every mutable field of row `id`; omitted fields take their
    /// create-time defaults
    fn update(&self, id: i64, doc: &Document) -> Result<()>;

    /// Delete row `id`. Deleting a missing row is not an error.
    fn remove(&self, id: i64) -> Result<()>;
}

/// Shared CRUD orchestration over one resource kind
pub struct Table<R: Resource> {
    db: Arc<Database>,
    _resource: PhantomData<R>,
}

impl<R: Resource> Table<R> {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            _resource: PhantomData,
        }
    }

    fn delete_statement(conn: &Connection, id: i64) -> Result<Statement<'_>> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", R::TABLE);
        let mut stmt = Statement::prepare(conn, &sql)?;
        stmt.bind(1, Param::Integer(id))?;
        Ok(stmt)
    }
}

impl<R: Resource> ResourceTable for Table<R> {
    fn kind(&self) -> &'static str {
        R::KIND
    }

    fn insert(&self, doc: &Document) -> Result<i64> {
        let start = Instant::now();
        R::validate(doc)?;

        // Insert and last-insert-id must observe the same lock hold
        let id = self.db.with_conn(|conn| {
            R::insert_statement(conn, doc)?.execute()?;
            Ok(conn.last_insert_rowid())
        })?;

        tracing::debug!(table = R::TABLE, id, "inserted row");
        trace_time!(start, "insert", table = R::TABLE);
        Ok(id)
    }

    fn list(&self, filter: &Filter) -> Result<Vec<Document>> {
        let start = Instant::now();
        let items = self.db.with_conn(|conn| {
            let mut stmt = R::list_statement(conn, filter)?;
            let mut cursor = stmt.query();
            let mut items = Vec::new();
            while let Some(record) = cursor.step()? {
                items.push(R::shallow(&record)?);
            }
            Ok(items)
        })?;

        trace_time!(start, "list", table = R::TABLE, rows = items.len());
        Ok(items)
    }

    fn get_one(&self, id: i64) -> Result<Document> {
        let start = Instant::now();
        let doc = self.db.with_conn(|conn| {
            let mut stmt = R::get_one_statement(conn, id)?;
            let mut cursor = stmt.query();

            let doc = match cursor.step()? {
                Some(record) => R::detailed(&record)?,
                None => return Err(NerdError::not_found(R::KIND, id)),
            };

            if cursor.step()?.is_some() {
                return Err(NerdError::Internal(format!(
                    "more than one {} with id {}",
                    R::KIND,
                    id
                )));
            }
            Ok(doc)
        })?;

        trace_time!(start, "get_one", table = R::TABLE, id = id);
        Ok(doc)
    }

    fn update(&self, id: i64, doc: &Document) -> Result<()> {
        let start = Instant::now();
        R::validate(doc)?;

        let changed = self
            .db
            .with_conn(|conn| R::update_statement(conn, id, doc)?.execute())?;
        if changed == 0 {
            return Err(NerdError::not_found(R::KIND, id));
        }

        tracing::debug!(table = R::TABLE, id, "updated row");
        trace_time!(start, "update", table = R::TABLE);
        Ok(())
    }

    fn remove(&self, id: i64) -> Result<()> {
        let start = Instant::now();
        let removed = self
            .db
            .with_conn(|conn| Self::delete_statement(conn, id)?.execute())?;

        tracing::debug!(table = R::TABLE, id, removed, "removed row");
        trace_time!(start, "remove", table = R::TABLE);
        Ok(())
    }
}

/// A field that must be present as a non-empty string
fn required_text<'d>(doc: &'d Document, kind: &str, field: &str) -> Result<&'d str> {
    match doc.get(field) {
        Some(Value::String(text)) if !text.is_empty() => Ok(text),
        Some(Value::String(_)) => bail_validation!(kind, format!("{} must not be empty", field)),
        None | Some(Value::Null) => bail_validation!(kind, format!("{} is missing", field)),
        Some(_) => bail_validation!(kind, format!("{} must be a string", field)),
    }
}

/// A field that may be absent or null; otherwise a string
fn optional_text<'d>(doc: &'d Document, kind: &str, field: &str) -> Result<Option<&'d str>> {
    match doc.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => bail_validation!(kind, format!("{} must be a string", field)),
    }
}

/// A field that may be absent or null; otherwise an integer
fn optional_integer(doc: &Document, kind: &str, field: &str) -> Result<Option<i64>> {
    match doc.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match value.as_i64() {
            Some(n) => Ok(Some(n)),
            None => bail_validation!(kind, format!("{} must be an integer", field)),
        },
    }
}

#[cfg(test)]
mod tests;
