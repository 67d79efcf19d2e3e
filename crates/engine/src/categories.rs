//! Category registry.
//!
//! Categories are free-text labels. The set only grows: there is no rename or
//! removal. When the registry is found empty it is seeded with
//! [`DEFAULT_CATEGORIES`].

use std::collections::BTreeSet;

use crate::{EngineError, ResultEngine};

pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Rent",
    "Groceries",
    "Transport",
    "Entertainment",
    "Utilities",
    "Subscriptions",
    "Health",
    "Income",
    "Other",
];

pub const RENT: &str = "Rent";
pub const INCOME: &str = "Income";

#[derive(Clone, Debug, Default)]
pub struct CategorySet {
    names: BTreeSet<String>,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Seed the defaults if, and only if, the set is empty.
    ///
    /// Returns `true` when the defaults were inserted.
    pub fn ensure_defaults(&mut self) -> bool {
        if !self.names.is_empty() {
            return false;
        }
        self.names
            .extend(DEFAULT_CATEGORIES.iter().map(|name| (*name).to_string()));
        true
    }

    /// Trim and insert `name`, returning the stored label.
    pub fn add(&mut self, name: &str) -> ResultEngine<String> {
        let name = normalize_category(name)?;
        self.names.insert(name.clone());
        Ok(name)
    }

    /// All labels, sorted. Callers must not depend on the order.
    pub fn list(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

pub(crate) fn normalize_category(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidCategory(
            "category name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
