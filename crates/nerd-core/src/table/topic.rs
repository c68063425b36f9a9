use rusqlite::Connection;
use serde_json::Value;

use super::{required_text, Document, Filter, Resource};
use crate::db::{Param, Record, Statement};
use crate::error::Result;

/// A named group of cards
pub struct Topic;

impl Resource for Topic {
    const KIND: &'static str = "topic";
    const TABLE: &'static str = "topic";

    fn validate(doc: &Document) -> Result<()> {
        required_text(doc, Self::KIND, "name")?;
        Ok(())
    }

    fn insert_statement<'c>(conn: &'c Connection, doc: &Document) -> Result<Statement<'c>> {
        let mut stmt = Statement::prepare(conn, "INSERT INTO topic (name) VALUES (?1)")?;
        stmt.bind(1, Param::Text(required_text(doc, Self::KIND, "name")?))?;
        Ok(stmt)
    }

    // Topics have no filterable fields
    fn list_statement<'c>(conn: &'c Connection, _filter: &Filter) -> Result<Statement<'c>> {
        Statement::prepare(conn, "SELECT id, name FROM topic")
    }

    fn get_one_statement<'c>(conn: &'c Connection, id: i64) -> Result<Statement<'c>> {
        let mut stmt = Statement::prepare(conn, "SELECT id, name FROM topic WHERE id = ?1")?;
        stmt.bind(1, Param::Integer(id))?;
        Ok(stmt)
    }

    fn update_statement<'c>(
        conn: &'c Connection,
        id: i64,
        doc: &Document,
    ) -> Result<Statement<'c>> {
        let mut stmt = Statement::prepare(conn, "UPDATE topic SET name = ?1 WHERE id = ?2")?;
        stmt.bind(1, Param::Text(required_text(doc, Self::KIND, "name")?))?;
        stmt.bind(2, Param::Integer(id))?;
        Ok(stmt)
    }

    fn shallow(record: &Record<'_, '_>) -> Result<Document> {
        let mut doc = Document::new();
        doc.insert("id".to_string(), Value::from(record.integer(0)?));
        doc.insert("name".to_string(), Value::from(record.text(1)?));
        Ok(doc)
    }

    fn detailed(record: &Record<'_, '_>) -> Result<Document> {
        Self::shallow(record)
    }
}
