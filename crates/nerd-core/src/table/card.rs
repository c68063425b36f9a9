use rusqlite::Connection;
use serde_json::Value;

use super::{optional_integer, optional_text, required_text, Document, Filter, Resource};
use crate::db::{Param, Record, Statement, DEFAULT_TOPIC_ID};
use crate::error::{NerdError, Result};

/// A flashcard: title, question, optional answer, owning topic
pub struct Card;

impl Card {
    /// Bind the four mutable columns at positions 1..=4
    fn bind_fields(stmt: &mut Statement<'_>, doc: &Document) -> Result<()> {
        stmt.bind(1, Param::Text(required_text(doc, Self::KIND, "title")?))?;
        stmt.bind(2, Param::Text(required_text(doc, Self::KIND, "question")?))?;
        stmt.bind(3, Param::from(optional_text(doc, Self::KIND, "answer")?))?;
        let topic = optional_integer(doc, Self::KIND, "topic")?.unwrap_or(DEFAULT_TOPIC_ID);
        stmt.bind(4, Param::Integer(topic))
    }
}

impl Resource for Card {
    const KIND: &'static str = "card";
    const TABLE: &'static str = "card";

    fn validate(doc: &Document) -> Result<()> {
        required_text(doc, Self::KIND, "title")?;
        required_text(doc, Self::KIND, "question")?;
        optional_text(doc, Self::KIND, "answer")?;
        optional_integer(doc, Self::KIND, "topic")?;
        Ok(())
    }

    fn insert_statement<'c>(conn: &'c Connection, doc: &Document) -> Result<Statement<'c>> {
        let mut stmt = Statement::prepare(
            conn,
            "INSERT INTO card (title, question, answer, topic) VALUES (?1, ?2, ?3, ?4)",
        )?;
        Self::bind_fields(&mut stmt, doc)?;
        Ok(stmt)
    }

    fn list_statement<'c>(conn: &'c Connection, filter: &Filter) -> Result<Statement<'c>> {
        let Some(raw) = filter.get("topic") else {
            return Statement::prepare(conn, "SELECT id, title FROM card");
        };

        let topic: i64 = raw.parse().map_err(|_| {
            NerdError::validation(
                Self::KIND,
                format!("topic filter must be an integer, got '{}'", raw),
            )
        })?;
        let mut stmt = Statement::prepare(conn, "SELECT id, title FROM card WHERE topic = ?1")?;
        stmt.bind(1, Param::Integer(topic))?;
        Ok(stmt)
    }

    fn get_one_statement<'c>(conn: &'c Connection, id: i64) -> Result<Statement<'c>> {
        let mut stmt = Statement::prepare(
            conn,
            "SELECT id, title, question, answer, topic FROM card WHERE id = ?1",
        )?;
        stmt.bind(1, Param::Integer(id))?;
        Ok(stmt)
    }

    fn update_statement<'c>(
        conn: &'c Connection,
        id: i64,
        doc: &Document,
    ) -> Result<Statement<'c>> {
        let mut stmt = Statement::prepare(
            conn,
            "UPDATE card SET title = ?1, question = ?2, answer = ?3, topic = ?4 WHERE id = ?5",
        )?;
        Self::bind_fields(&mut stmt, doc)?;
        stmt.bind(5, Param::Integer(id))?;
        Ok(stmt)
    }

    fn shallow(record: &Record<'_, '_>) -> Result<Document> {
        let mut doc = Document::new();
        doc.insert("id".to_string(), Value::from(record.integer(0)?));
        doc.insert("title".to_string(), Value::from(record.text(1)?));
        Ok(doc)
    }

    fn detailed(record: &Record<'_, '_>) -> Result<Document> {
        let mut doc = Document::new();
        doc.insert("id".to_string(), Value::from(record.integer(0)?));
        doc.insert("title".to_string(), Value::from(record.text(1)?));
        doc.insert("question".to_string(), Value::from(record.text(2)?));
        if let Some(answer) = record.optional_text(3)? {
            doc.insert("answer".to_string(), Value::from(answer));
        }
        doc.insert("topic".to_string(), Value::from(record.integer(4)?));
        Ok(doc)
    }
}
