//! Route-name to resource table mapping.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Card, ResourceTable, Table, Topic};
use crate::db::Database;

/// Maps the resource segment of an API path to its table.
///
/// Names that are not registered are not reserved: the dispatcher treats
/// them as static file paths.
#[derive(Default)]
pub struct Registry {
    tables: HashMap<&'static str, Arc<dyn ResourceTable>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the `cards` and `topics` tables over `db`
    pub fn with_defaults(db: Arc<Database>) -> Self {
        let mut registry = Self::new();
        registry.register("cards", Table::<Card>::new(Arc::clone(&db)));
        registry.register("topics", Table::<Topic>::new(db));
        registry
    }

    pub fn register<T: ResourceTable + 'static>(&mut self, name: &'static str, table: T) {
        self.tables.insert(name, Arc::new(table));
    }

    /// Exact-match lookup
    pub fn get(&self, name: &str) -> Option<Arc<dyn ResourceTable>> {
        self.tables.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tables.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
