
//! Id → name resolution for labels, relationship types and property keys.
//!
//! Compact replies reference schema entries by small dense integer ids. Each
//! table is a cache of the server's introspection result: lookups that hit
//! take a shared read lock only, a miss refreshes the whole table once and
//! re-checks before giving up with [`FalkorError::UnknownSchemaId`].

use std::fmt;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::{debug, warn};

use crate::error::FalkorError;

/// The three schema tables a graph keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Label,
    RelationshipType,
    PropertyKey,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [
        SchemaKind::Label,
        SchemaKind::RelationshipType,
        SchemaKind::PropertyKey,
    ];

    /// Introspection procedure that lists this table in id order.
    pub fn procedure(self) -> &'static str {
        match self {
            SchemaKind::Label => "db.labels",
            SchemaKind::RelationshipType => "db.relationshipTypes",
            SchemaKind::PropertyKey => "db.propertyKeys",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchemaKind::Label => "label",
            SchemaKind::RelationshipType => "relationship type",
            SchemaKind::PropertyKey => "property key",
        })
    }
}

/// Anything that can list a schema table from the server.
///
/// Implementations return the names in ascending id order starting at 0.
/// The graph handle implements this by running the table's introspection
/// procedure; tests use scripted sources.
pub trait SchemaSource {
    fn fetch_schema(&self, kind: SchemaKind) -> Result<Vec<String>, FalkorError>;
}

impl<S: SchemaSource + ?Sized> SchemaSource for &S {
    fn fetch_schema(&self, kind: SchemaKind) -> Result<Vec<String>, FalkorError> {
        (**self).fetch_schema(kind)
    }
}

/// One id → name table.
#[derive(Debug)]
pub struct SchemaTable {
    kind: SchemaKind,
    names: RwLock<Vec<String>>,
}

impl SchemaTable {
    pub fn new(kind: SchemaKind) -> Self {
        SchemaTable {
            kind,
            names: RwLock::new(Vec::new()),
        }
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }

    /// Resolve `id`, refreshing the table from `source` at most once.
    ///
    /// Refreshers serialize on the table's upgradable lock while plain hits
    /// keep reading. A refresh replaces the table wholesale.
    pub fn resolve(&self, id: i64, source: &dyn SchemaSource) -> Result<String, FalkorError> {
        let unknown = || FalkorError::UnknownSchemaId {
            table: self.kind,
            id,
        };
        let idx = usize::try_from(id).map_err(|_| unknown())?;

        if let Some(name) = self.names.read().get(idx) {
            return Ok(name.clone());
        }

        let guard = self.names.upgradable_read();
        // Another caller may have refreshed while we waited.
        if let Some(name) = guard.get(idx) {
            return Ok(name.clone());
        }

        let fresh = source.fetch_schema(self.kind)?;
        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        debug!(
            table = %self.kind,
            id,
            old_len = guard.len(),
            new_len = fresh.len(),
            "schema.refresh"
        );
        *guard = fresh;

        match guard.get(idx) {
            Some(name) => Ok(name.clone()),
            None => {
                warn!(table = %self.kind, id, len = guard.len(), "schema.unknown_id");
                Err(unknown())
            }
        }
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.names.write().clear();
    }

    /// Copy of the cached names in id order.
    pub fn snapshot(&self) -> Vec<String> {
        self.names.read().clone()
    }
}

/// The schema cache owned by one graph handle.
#[derive(Debug)]
pub struct GraphSchema {
    labels: SchemaTable,
    relationship_types: SchemaTable,
    property_keys: SchemaTable,
}

impl Default for GraphSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphSchema {
    pub fn new() -> Self {
        GraphSchema {
            labels: SchemaTable::new(SchemaKind::Label),
            relationship_types: SchemaTable::new(SchemaKind::RelationshipType),
            property_keys: SchemaTable::new(SchemaKind::PropertyKey),
        }
    }

    pub fn table(&self, kind: SchemaKind) -> &SchemaTable {
        match kind {
            SchemaKind::Label => &self.labels,
            SchemaKind::RelationshipType => &self.relationship_types,
            SchemaKind::PropertyKey => &self.property_keys,
        }
    }

    pub fn resolve(
        &self,
        kind: SchemaKind,
        id: i64,
        source: &dyn SchemaSource,
    ) -> Result<String, FalkorError> {
        self.table(kind).resolve(id, source)
    }

    /// Reset all three tables to empty; the next lookup starts cold.
    pub fn clear(&self) {
        debug!("schema.clear");
        for kind in SchemaKind::ALL {
            self.table(kind).clear();
        }
    }
}
