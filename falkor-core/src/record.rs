
//! One decoded row of a result set.

use std::sync::Arc;

use crate::error::FalkorError;
use crate::value::Value;

/// An immutable row: values in column order plus the header's column names.
///
/// Column names are shared between all records of a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
    keys: Arc<[String]>,
}

impl Record {
    pub fn new(values: Vec<Value>, keys: Arc<[String]>) -> Self {
        Record { values, keys }
    }

    /// Value at `index`, or [`FalkorError::IndexOutOfRange`].
    pub fn get(&self, index: usize) -> Result<&Value, FalkorError> {
        self.values.get(index).ok_or(FalkorError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// Value of the first column called `name`. Absence is not an error.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.keys
            .iter()
            .position(|k| k == name)
            .and_then(|i| self.values.get(i))
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn column_names(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

// Centralized access used by derive-generated code.

/// Read a cloned value from a [`Record`] by column name.
///
/// Returns `None` if the column does not exist in the record.
pub fn get_value(record: &Record, key: &str) -> Option<Value> {
    record.get_by_name(key).cloned()
}

/// Check whether a column exists in the record.
pub fn has_key(record: &Record, key: &str) -> bool {
    record.get_by_name(key).is_some()
}
