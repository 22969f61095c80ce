
//! Query statistics trailing every reply.
//!
//! The server reports statistics as human-readable lines such as
//! `"Nodes created: 2"` or `"Query internal execution time: 0.25 milliseconds"`.
//! Statistics are auxiliary, so a line that cannot be parsed degrades to 0
//! instead of failing the query.

use std::collections::HashMap;

use tracing::debug;

use crate::error::DecodeError;
use crate::raw::RawCell;

pub const LABELS_ADDED: &str = "Labels added";
pub const NODES_CREATED: &str = "Nodes created";
pub const NODES_DELETED: &str = "Nodes deleted";
pub const RELATIONSHIPS_CREATED: &str = "Relationships created";
pub const RELATIONSHIPS_DELETED: &str = "Relationships deleted";
pub const PROPERTIES_SET: &str = "Properties set";
pub const INDICES_CREATED: &str = "Indices created";
pub const INDICES_DELETED: &str = "Indices deleted";
pub const CACHED_EXECUTION: &str = "Cached execution";
pub const INTERNAL_EXECUTION_TIME: &str = "Query internal execution time";

/// Parsed statistics of one query, keyed by the literal statistic name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    values: HashMap<String, f64>,
}

impl Statistics {
    /// Parse the statistics block of a reply.
    ///
    /// The block itself must be a sequence; individual lines never fail.
    pub fn from_cell(cell: RawCell) -> Result<Self, DecodeError> {
        let mut stats = Statistics::default();
        for line in cell.into_seq("statistics")? {
            match line.into_text("statistics line") {
                Ok(text) => stats.parse_line(&text),
                Err(err) => debug!(error = %err, "result.stat_unparsed"),
            }
        }
        Ok(stats)
    }

    /// Build statistics from already-split lines.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut stats = Statistics::default();
        for line in lines {
            stats.parse_line(line);
        }
        stats
    }

    fn parse_line(&mut self, line: &str) {
        let Some((name, rest)) = line.split_once(": ") else {
            debug!(line, "result.stat_unparsed");
            return;
        };
        let value = match rest.split_whitespace().next().map(str::parse::<f64>) {
            Some(Ok(v)) => v,
            _ => {
                debug!(line, "result.stat_unparsed");
                0.0
            }
        };
        self.values.insert(name.to_owned(), value);
    }

    /// Raw value of a statistic, 0 when absent.
    pub fn get(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn count(&self, name: &str) -> u64 {
        self.get(name) as u64
    }

    pub fn labels_added(&self) -> u64 {
        self.count(LABELS_ADDED)
    }

    pub fn nodes_created(&self) -> u64 {
        self.count(NODES_CREATED)
    }

    pub fn nodes_deleted(&self) -> u64 {
        self.count(NODES_DELETED)
    }

    pub fn relationships_created(&self) -> u64 {
        self.count(RELATIONSHIPS_CREATED)
    }

    pub fn relationships_deleted(&self) -> u64 {
        self.count(RELATIONSHIPS_DELETED)
    }

    pub fn properties_set(&self) -> u64 {
        self.count(PROPERTIES_SET)
    }

    pub fn indices_created(&self) -> u64 {
        self.count(INDICES_CREATED)
    }

    pub fn indices_deleted(&self) -> u64 {
        self.count(INDICES_DELETED)
    }

    /// Whether the server reused a cached execution plan.
    pub fn cached_execution(&self) -> bool {
        self.get(CACHED_EXECUTION) != 0.0
    }

    /// Server-side execution time in milliseconds.
    pub fn internal_execution_time(&self) -> f64 {
        self.get(INTERNAL_EXECUTION_TIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_suffix_is_ignored() {
        let stats = Statistics::from_lines(["Query internal execution time: 0.3754 milliseconds"]);
        assert!((stats.internal_execution_time() - 0.3754).abs() < 1e-9);
    }

    #[test]
    fn garbage_degrades_to_zero() {
        let stats = Statistics::from_lines(["Nodes created: many", "no separator here"]);
        assert_eq!(stats.nodes_created(), 0);
        assert!(stats.contains(NODES_CREATED));
        assert_eq!(stats.len(), 1);
    }

    #[test]
    fn splits_only_once() {
        let stats = Statistics::from_lines(["Weird: name: 4"]);
        // Remainder "name: 4" starts with a non-number.
        assert_eq!(stats.get("Weird"), 0.0);
        assert!(!stats.contains("Weird: name"));
    }

    #[test]
    fn cached_execution_flag() {
        assert!(Statistics::from_lines(["Cached execution: 1"]).cached_execution());
        assert!(!Statistics::from_lines(["Cached execution: 0"]).cached_execution());
        assert!(!Statistics::default().cached_execution());
    }
}
