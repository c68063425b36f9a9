//! SQLite database schema for nerd

use rusqlite::{Connection, Result};

/// Id of the pre-seeded topic every card falls back to
pub const DEFAULT_TOPIC_ID: i64 = 0;

const SCHEMA_SQL: &str = r#"
-- Topics group cards; id 0 is the reserved Default topic
CREATE TABLE IF NOT EXISTS topic (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL
);

INSERT OR IGNORE INTO topic (id, name) VALUES (0, 'Default');

-- Cards reset to the Default topic when their topic is deleted
CREATE TABLE IF NOT EXISTS card (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    title TEXT NOT NULL,
    question TEXT NOT NULL,
    answer TEXT,
    topic INTEGER NOT NULL DEFAULT 0
        REFERENCES topic(id) ON UPDATE CASCADE ON DELETE SET DEFAULT
);
CREATE INDEX IF NOT EXISTS idx_card_topic ON card(topic);
"#;

/// Create both tables and seed the Default topic. Safe to run repeatedly.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
