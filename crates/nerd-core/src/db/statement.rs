//! Prepared statement wrapper
//!
//! A [`Statement`] owns one prepared query for its lifetime and finalizes it
//! on drop, including when an error interrupted its use. Parameters are bound
//! by 1-based position; rows are read through a [`Cursor`].

use rusqlite::types::{Null, ValueRef};
use rusqlite::Connection;

use crate::error::{NerdError, Result};
use crate::map_db_err;

/// A value that can be bound to a statement parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param<'a> {
    Null,
    Integer(i64),
    Text(&'a str),
}

impl<'a> From<Option<&'a str>> for Param<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Param::Null, Param::Text)
    }
}

/// Largest text the engine accepts as a single parameter
const MAX_TEXT_PARAM: usize = i32::MAX as usize;

pub struct Statement<'conn> {
    inner: rusqlite::Statement<'conn>,
}

impl<'conn> Statement<'conn> {
    /// Prepare `sql` against `conn`.
    ///
    /// Fails when the template is malformed or names an unknown table.
    pub fn prepare(conn: &'conn Connection, sql: &str) -> Result<Self> {
        let inner = conn
            .prepare(sql)
            .map_err(map_db_err!("prepare statement"))?;
        Ok(Statement { inner })
    }

    /// Bind `param` to the 1-based `position`
    pub fn bind(&mut self, position: usize, param: Param<'_>) -> Result<()> {
        let bound = match param {
            Param::Null => self.inner.raw_bind_parameter(position, Null),
            Param::Integer(value) => self.inner.raw_bind_parameter(position, value),
            Param::Text(text) => {
                if text.len() > MAX_TEXT_PARAM {
                    return Err(NerdError::Bind {
                        position,
                        reason: format!("text of {} bytes is too long", text.len()),
                    });
                }
                self.inner.raw_bind_parameter(position, text)
            }
        };

        bound.map_err(|e| NerdError::Bind {
            position,
            reason: e.to_string(),
        })
    }

    /// Run a statement that yields no rows, returning the affected-row count
    pub fn execute(&mut self) -> Result<usize> {
        self.inner
            .raw_execute()
            .map_err(map_db_err!("execute statement"))
    }

    /// Start stepping through the rows this statement yields
    pub fn query(&mut self) -> Cursor<'_> {
        Cursor {
            rows: self.inner.raw_query(),
        }
    }
}

/// Forward-only, non-restartable iteration over result rows
pub struct Cursor<'stmt> {
    rows: rusqlite::Rows<'stmt>,
}

impl<'stmt> Cursor<'stmt> {
    /// Advance to the next row. `None` means the statement is done and the
    /// cursor must not be stepped again.
    pub fn step(&mut self) -> Result<Option<Record<'_, 'stmt>>> {
        let row = self.rows.next().map_err(map_db_err!("step statement"))?;
        Ok(row.map(|row| Record { row }))
    }
}

/// The current row of a [`Cursor`]
pub struct Record<'a, 'stmt> {
    row: &'a rusqlite::Row<'stmt>,
}

impl Record<'_, '_> {
    fn value(&self, column: usize) -> Result<ValueRef<'_>> {
        self.row
            .get_ref(column)
            .map_err(map_db_err!("read column"))
    }

    /// Read an integer column. NULL yields [`NerdError::ColumnIsNull`].
    pub fn integer(&self, column: usize) -> Result<i64> {
        match self.value(column)? {
            ValueRef::Integer(value) => Ok(value),
            ValueRef::Null => Err(NerdError::ColumnIsNull { column }),
            other => Err(NerdError::Internal(format!(
                "column {} holds {:?}, expected integer",
                column,
                other.data_type()
            ))),
        }
    }

    /// Read a text column. NULL yields [`NerdError::ColumnIsNull`].
    pub fn text(&self, column: usize) -> Result<String> {
        match self.value(column)? {
            ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec()).map_err(|e| {
                NerdError::Internal(format!("column {} is not valid UTF-8: {}", column, e))
            }),
            ValueRef::Null => Err(NerdError::ColumnIsNull { column }),
            other => Err(NerdError::Internal(format!(
                "column {} holds {:?}, expected text",
                column,
                other.data_type()
            ))),
        }
    }

    /// Read a nullable text column, mapping NULL to `None`
    pub fn optional_text(&self, column: usize) -> Result<Option<String>> {
        match self.text(column) {
            Ok(text) => Ok(Some(text)),
            Err(NerdError::ColumnIsNull { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
