//! Id-keyed entity tables.
//!
//! Every table maps an entity id to the entity. Inserting an id that is
//! already present overwrites the previous value; ids come from
//! [`IdGenerator`](crate::IdGenerator), so that only happens for ids supplied
//! by clients. There is no delete.

use std::collections::HashMap;

/// An entity that can be stored in a [`Table`].
pub trait Keyed {
    fn id(&self) -> &str;
}

#[derive(Clone, Debug)]
pub struct Table<T> {
    rows: HashMap<String, T>,
}

impl<T: Keyed + Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    pub fn insert(&mut self, row: T) {
        self.rows.insert(row.id().to_string(), row);
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.rows.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.rows.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Clone every row out of the table. Order is unspecified.
    pub fn snapshot(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

impl<T: Keyed + Clone> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
