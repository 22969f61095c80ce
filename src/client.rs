
//! Server-wide handle: graph selection, graph listing and module configuration.

use std::fmt;

use falkor_core::error::{DecodeError, FalkorError};
use falkor_core::raw::RawCell;
use falkor_core::value::Value;

use crate::graph::{Command, Connection, Graph};

/// A connection to a FalkorDB server, independent of any one graph.
///
/// ```rust,no_run
/// # use falkor::{Connection, FalkorDB, FalkorError};
/// # fn example<C: Connection>(conn: C) -> Result<(), FalkorError> {
/// let db = FalkorDB::new(conn);
/// for name in db.list_graphs()? {
///     println!("{name}");
/// }
/// let social = db.select_graph("social");
/// let result = social.query("MATCH (n) RETURN count(n)")?;
/// # Ok(())
/// # }
/// ```
pub struct FalkorDB<C> {
    connection: C,
}

impl<C: Connection> FalkorDB<C> {
    pub fn new(connection: C) -> Self {
        FalkorDB { connection }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// A handle on graph `name` sharing this connection.
    ///
    /// Each call returns a fresh handle with its own, empty schema cache.
    pub fn select_graph(&self, name: impl Into<String>) -> Graph<&C> {
        Graph::new(name, &self.connection)
    }

    /// Names of all graphs on the server (`GRAPH.LIST`).
    pub fn list_graphs(&self) -> Result<Vec<String>, FalkorError> {
        let reply = self.connection.execute(&Command::list())?;
        match reply {
            RawCell::Seq(names) => names
                .into_iter()
                .map(|name| Ok(name.into_text("graph name")?))
                .collect(),
            RawCell::Null => Ok(Vec::new()),
            other => Err(DecodeError::shape("Seq", other.type_name(), "graph list").into()),
        }
    }

    /// Read a module setting (`GRAPH.CONFIG GET <key>`).
    ///
    /// `"*"` returns every setting; a single key returns one entry.
    pub fn config_get(&self, key: &str) -> Result<Vec<(String, Value)>, FalkorError> {
        let reply = self.connection.execute(&Command::config_get(key))?;
        let items = match reply {
            RawCell::Seq(items) => items,
            other => return Err(DecodeError::shape("Seq", other.type_name(), "config reply").into()),
        };
        // A single entry arrives flat as [name, value], a wildcard as a list of pairs.
        if matches!(items.first(), Some(RawCell::Seq(_))) {
            items.into_iter().map(config_entry).collect()
        } else {
            Ok(vec![config_entry(RawCell::Seq(items))?])
        }
    }

    /// Change a module setting (`GRAPH.CONFIG SET <key> <value>`).
    pub fn config_set(&self, key: &str, value: impl fmt::Display) -> Result<(), FalkorError> {
        self.connection
            .execute(&Command::config_set(key, &value.to_string()))
            .map(|_| ())
    }
}

fn config_entry(cell: RawCell) -> Result<(String, Value), FalkorError> {
    let [name, value] = cell.into_array::<2>("config entry")?;
    let name = name.into_text("config name")?;
    let value = match value {
        RawCell::Null => Value::Null,
        RawCell::Int(i) => Value::Integer(i),
        RawCell::Double(d) => Value::Double(d),
        RawCell::Str(_) => Value::String(value.into_text("config value")?),
        other => return Err(DecodeError::shape("scalar", other.type_name(), "config value").into()),
    };
    Ok((name, value))
}
