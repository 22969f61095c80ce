
//! The graph handle: command building, transport seam and schema ownership.

use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use falkor_core::error::{DecodeError, FalkorError};
use falkor_core::raw::RawCell;
use falkor_core::result::{assemble, ResultSet};
use falkor_core::schema::{GraphSchema, SchemaKind, SchemaSource};

/// Server command issued by a [`Graph`] or a [`FalkorDB`](crate::FalkorDB) handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Query,
    ReadOnlyQuery,
    Explain,
    Delete,
    List,
    ConfigGet,
    ConfigSet,
}

impl CommandKind {
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Query => "GRAPH.QUERY",
            CommandKind::ReadOnlyQuery => "GRAPH.RO_QUERY",
            CommandKind::Explain => "GRAPH.EXPLAIN",
            CommandKind::Delete => "GRAPH.DELETE",
            CommandKind::List => "GRAPH.LIST",
            CommandKind::ConfigGet | CommandKind::ConfigSet => "GRAPH.CONFIG",
        }
    }

    /// Whether the command asks for a compact reply.
    pub fn is_compact(self) -> bool {
        matches!(self, CommandKind::Query | CommandKind::ReadOnlyQuery)
    }
}

/// Per-query settings.
///
/// ```rust
/// # use std::time::Duration;
/// # use falkor::QueryOptions;
/// let opts = QueryOptions::new().timeout(Duration::from_millis(250)).read_only();
/// assert!(opts.read_only);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Server-side timeout; the transport sends it as whole milliseconds.
    pub timeout: Option<Duration>,
    /// Issue `GRAPH.RO_QUERY` instead of `GRAPH.QUERY`.
    pub read_only: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// A fully described server command, ready for a [`Connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    graph: Option<String>,
    query: Option<String>,
    timeout: Option<Duration>,
    config: Option<(String, Option<String>)>,
}

impl Command {
    fn new(kind: CommandKind) -> Self {
        Command {
            kind,
            graph: None,
            query: None,
            timeout: None,
            config: None,
        }
    }

    fn query(graph: &str, query: &str, options: QueryOptions) -> Self {
        let kind = if options.read_only {
            CommandKind::ReadOnlyQuery
        } else {
            CommandKind::Query
        };
        Command {
            graph: Some(graph.to_owned()),
            query: Some(query.to_owned()),
            timeout: options.timeout,
            ..Command::new(kind)
        }
    }

    fn explain(graph: &str, query: &str) -> Self {
        Command {
            graph: Some(graph.to_owned()),
            query: Some(query.to_owned()),
            ..Command::new(CommandKind::Explain)
        }
    }

    fn delete(graph: &str) -> Self {
        Command {
            graph: Some(graph.to_owned()),
            ..Command::new(CommandKind::Delete)
        }
    }

    pub(crate) fn list() -> Self {
        Command::new(CommandKind::List)
    }

    pub(crate) fn config_get(key: &str) -> Self {
        Command {
            config: Some((key.to_owned(), None)),
            ..Command::new(CommandKind::ConfigGet)
        }
    }

    pub(crate) fn config_set(key: &str, value: &str) -> Self {
        Command {
            config: Some((key.to_owned(), Some(value.to_owned()))),
            ..Command::new(CommandKind::ConfigSet)
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Target graph; `None` for server-wide commands.
    pub fn graph(&self) -> Option<&str> {
        self.graph.as_deref()
    }

    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Configuration key of a `GRAPH.CONFIG` command.
    pub fn config_key(&self) -> Option<&str> {
        self.config.as_ref().map(|(key, _)| key.as_str())
    }

    /// Wire arguments, command name first.
    ///
    /// Queries always carry `--compact`, followed by `timeout <ms>` when set.
    /// Configuration commands carry `GET <key>` or `SET <key> <value>`.
    pub fn args(&self) -> Vec<Bytes> {
        let mut args = vec![Bytes::from_static(self.kind.name().as_bytes())];
        match self.kind {
            CommandKind::ConfigGet => args.push(Bytes::from_static(b"GET")),
            CommandKind::ConfigSet => args.push(Bytes::from_static(b"SET")),
            _ => {}
        }
        if let Some((key, value)) = &self.config {
            args.push(Bytes::from(key.clone()));
            if let Some(value) = value {
                args.push(Bytes::from(value.clone()));
            }
        }
        if let Some(graph) = &self.graph {
            args.push(Bytes::from(graph.clone()));
        }
        if let Some(query) = &self.query {
            args.push(Bytes::from(query.clone()));
        }
        if self.kind.is_compact() {
            args.push(Bytes::from_static(b"--compact"));
            if let Some(timeout) = self.timeout {
                args.push(Bytes::from_static(b"timeout"));
                args.push(Bytes::from(timeout.as_millis().to_string()));
            }
        }
        args
    }
}

/// The transport seam. Sends one command and returns its raw reply.
///
/// Implementations own framing, connection pooling and timeouts; server
/// errors should come back as [`FalkorError::Transport`].
pub trait Connection {
    fn execute(&self, command: &Command) -> Result<RawCell, FalkorError>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn execute(&self, command: &Command) -> Result<RawCell, FalkorError> {
        (**self).execute(command)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn execute(&self, command: &Command) -> Result<RawCell, FalkorError> {
        (**self).execute(command)
    }
}

/// A named graph on one connection, with its own schema cache.
///
/// All methods take `&self`; the schema cache is safe to share between
/// threads as long as the connection is.
pub struct Graph<C> {
    name: String,
    connection: C,
    schema: GraphSchema,
}

impl<C: Connection> Graph<C> {
    pub fn new(name: impl Into<String>, connection: C) -> Self {
        Graph {
            name: name.into(),
            connection,
            schema: GraphSchema::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn schema(&self) -> &GraphSchema {
        &self.schema
    }

    /// Run a query with default options.
    pub fn query(&self, query: &str) -> Result<ResultSet, FalkorError> {
        self.query_with(query, QueryOptions::default())
    }

    /// Run a query through `GRAPH.RO_QUERY`.
    pub fn ro_query(&self, query: &str) -> Result<ResultSet, FalkorError> {
        self.query_with(query, QueryOptions::default().read_only())
    }

    /// Run a query and decode its compact reply.
    pub fn query_with(&self, query: &str, options: QueryOptions) -> Result<ResultSet, FalkorError> {
        let command = Command::query(&self.name, query, options);
        let reply = self.connection.execute(&command)?;
        assemble(reply, &self.schema, self)
    }

    /// `CALL <procedure>()` with no arguments, optionally followed by
    /// `YIELD` of the given outputs.
    pub fn call_procedure(&self, procedure: &str, yields: &[&str]) -> Result<ResultSet, FalkorError> {
        let mut query = format!("CALL {procedure}()");
        if !yields.is_empty() {
            query.push_str(" YIELD ");
            query.push_str(&yields.join(", "));
        }
        self.query(&query)
    }

    /// Execution plan lines for `query`, without running it.
    pub fn explain(&self, query: &str) -> Result<Vec<String>, FalkorError> {
        let reply = self.connection.execute(&Command::explain(&self.name, query))?;
        let lines = match reply {
            RawCell::Seq(lines) => lines,
            single => vec![single],
        };
        lines
            .into_iter()
            .map(|line| Ok(line.into_text("plan line")?))
            .collect()
    }

    /// Delete the graph on the server.
    ///
    /// The schema cache is cleared whether or not the command succeeds; the
    /// transport error, if any, is still returned.
    pub fn delete(&self) -> Result<(), FalkorError> {
        let outcome = self.connection.execute(&Command::delete(&self.name));
        self.schema.clear();
        debug!(graph = %self.name, ok = outcome.is_ok(), "graph.delete");
        outcome.map(|_| ())
    }

    /// All node labels, in id order. Bypasses the cache.
    pub fn labels(&self) -> Result<Vec<String>, FalkorError> {
        self.list(SchemaKind::Label)
    }

    /// All relationship types, in id order. Bypasses the cache.
    pub fn relationship_types(&self) -> Result<Vec<String>, FalkorError> {
        self.list(SchemaKind::RelationshipType)
    }

    /// All property keys, in id order. Bypasses the cache.
    pub fn property_keys(&self) -> Result<Vec<String>, FalkorError> {
        self.list(SchemaKind::PropertyKey)
    }

    fn list(&self, kind: SchemaKind) -> Result<Vec<String>, FalkorError> {
        let command = Command::query(
            &self.name,
            &format!("CALL {}()", kind.procedure()),
            QueryOptions::default(),
        );
        let reply = self.connection.execute(&command)?;
        // Decoded against a detached cache: a table of this graph may be
        // mid-refresh and must not be re-entered.
        let result = assemble(reply, &GraphSchema::new(), &ScalarOnly)?;
        result
            .into_iter()
            .map(|record| {
                let value = record.get(0)?;
                value
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| FalkorError::type_mismatch("String", value.type_name(), kind.procedure()))
            })
            .collect()
    }
}

impl<C: Connection> SchemaSource for Graph<C> {
    fn fetch_schema(&self, kind: SchemaKind) -> Result<Vec<String>, FalkorError> {
        self.list(kind)
    }
}

struct ScalarOnly;

impl SchemaSource for ScalarOnly {
    fn fetch_schema(&self, _kind: SchemaKind) -> Result<Vec<String>, FalkorError> {
        Err(DecodeError::shape("name string", "schema reference", "introspection listing").into())
    }
}
