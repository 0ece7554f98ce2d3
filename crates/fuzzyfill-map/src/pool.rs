//! Reference pool and consumed-key tracking.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use fuzzyfill_model::{CellValue, Table, normalize_key};

use crate::error::Result;

/// Normalized reference key to payload mapping.
///
/// Keys keep the order in which they were first seen in the reference table;
/// that order is the tie break between equally scored candidates. When a
/// key appears more than once, the last row's value wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferencePool {
    keys: Vec<String>,
    values: HashMap<String, CellValue>,
}

impl ReferencePool {
    /// Builds the pool from `key_column` and `value_column` of the reference
    /// table.
    pub fn build(reference: &Table, key_column: &str, value_column: &str) -> Result<Self> {
        let key_column = reference.require_column(key_column, "reference")?;
        let value_column = reference.require_column(value_column, "reference")?;
        Ok(Self::from_entries(reference.rows.iter().map(|row| {
            (
                row.get(key_column.as_str()).clone(),
                row.get(value_column.as_str()).clone(),
            )
        })))
    }

    /// Builds a pool from raw key/value pairs, normalizing each key.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<CellValue>,
        V: Into<CellValue>,
    {
        let mut pool = Self::default();
        for (key, value) in entries {
            pool.insert(normalize_key(&key.into()), value.into());
        }
        pool
    }

    fn insert(&mut self, key: String, value: CellValue) {
        match self.values.entry(key) {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
            }
            Entry::Vacant(entry) => {
                self.keys.push(entry.key().clone());
                entry.insert(value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn value(&self, key: &str) -> Option<&CellValue> {
        self.values.get(key)
    }

    /// Candidate keys for the next row, in first-seen order.
    ///
    /// With duplicate prevention off this is every key; with it on, keys in
    /// `consumed` are left out. An empty result means "no candidate".
    pub fn available_keys(&self, consumed: &ConsumedKeys, prevent_duplicates: bool) -> Vec<&str> {
        if !prevent_duplicates {
            return self.keys().collect();
        }
        self.keys().filter(|key| !consumed.contains(key)).collect()
    }
}

/// Reference keys already assigned during a run.
///
/// Only grows; a fresh, empty set starts every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumedKeys(BTreeSet<String>);

impl ConsumedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set with `key` added.
    #[must_use]
    pub fn consume(mut self, key: &str) -> Self {
        self.0.insert(key.to_string());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
