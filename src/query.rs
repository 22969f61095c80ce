
use std::time::Duration;

use falkor_core::error::FalkorError;
use falkor_core::result::ResultSet;
use falkor_core::traits::FromFalkor;

use crate::graph::{Connection, Graph, QueryOptions};
use crate::stream::FalkorRows;

/// A query string plus its options, with typed fetch helpers that map
/// records via [`FromFalkor`].
///
/// # Examples
///
/// ```rust,no_run
/// # use falkor::query::GraphQuery;
/// # use falkor::{Connection, Graph, FalkorError};
/// # #[derive(falkor::FromFalkor)] struct UserRow { name: String }
/// # fn example<C: Connection>(graph: &Graph<C>) -> Result<(), FalkorError> {
/// let users: Vec<UserRow> = GraphQuery::new("MATCH (u:User) RETURN u.name AS name")
///     .read_only()
///     .fetch_all(graph)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GraphQuery {
    text: String,
    options: QueryOptions,
}

impl GraphQuery {
    /// Create a new query from a Cypher string.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            text: query.into(),
            options: QueryOptions::default(),
        }
    }

    /// Ask the server to abort the query after `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.timeout(timeout);
        self
    }

    /// Send the query as `GRAPH.RO_QUERY`.
    pub fn read_only(mut self) -> Self {
        self.options = self.options.read_only();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Execute against a [`Graph`] and return the untyped result set.
    pub fn execute<C: Connection>(self, graph: &Graph<C>) -> Result<ResultSet, FalkorError> {
        graph.query_with(&self.text, self.options)
    }

    /// Execute against a [`Graph`] and return the first row, mapped to `T`.
    ///
    /// Returns [`FalkorError::MissingField`] if the result set is empty.
    pub fn fetch_one<T: FromFalkor, C: Connection>(self, graph: &Graph<C>) -> Result<T, FalkorError> {
        let result = self.execute(graph)?;
        let record = result
            .records()
            .first()
            .ok_or_else(|| FalkorError::missing_field("row", "fetch_one"))?;
        T::from_record(record)
    }

    /// Execute against a [`Graph`] and return zero or one row, mapped to `T`.
    ///
    /// Returns `Ok(None)` if the result set is empty. Rows past the first
    /// are ignored.
    ///
    /// ```rust,no_run
    /// # use falkor::query::GraphQuery;
    /// # use falkor::{Connection, Graph, FalkorError};
    /// # #[derive(falkor::FromFalkor)] struct UserRow { name: String }
    /// # fn example<C: Connection>(graph: &Graph<C>) -> Result<(), FalkorError> {
    /// let user: Option<UserRow> = GraphQuery::new("MATCH (u:User {id: 1}) RETURN u.name AS name")
    ///     .fetch_optional(graph)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn fetch_optional<T: FromFalkor, C: Connection>(
        self,
        graph: &Graph<C>,
    ) -> Result<Option<T>, FalkorError> {
        let result = self.execute(graph)?;
        result.records().first().map(T::from_record).transpose()
    }

    /// Execute against a [`Graph`] and map every row into `Vec<T>`.
    ///
    /// Fails on the first row that does not map.
    pub fn fetch_all<T: FromFalkor, C: Connection>(self, graph: &Graph<C>) -> Result<Vec<T>, FalkorError> {
        self.fetch_iter(graph)?.collect()
    }

    /// Execute against a [`Graph`] and return an iterator that maps rows
    /// to `T` one at a time.
    ///
    /// The reply is decoded in full before the first row is yielded; only
    /// the typed mapping is lazy.
    ///
    /// ```rust,no_run
    /// # use falkor::query::GraphQuery;
    /// # use falkor::{Connection, Graph, FalkorError};
    /// # #[derive(falkor::FromFalkor)] struct UserRow { name: String }
    /// # fn example<C: Connection>(graph: &Graph<C>) -> Result<(), FalkorError> {
    /// let rows = GraphQuery::new("MATCH (u:User) RETURN u.name AS name")
    ///     .fetch_iter::<UserRow, _>(graph)?;
    ///
    /// for row in rows {
    ///     let user = row?;
    ///     println!("{}", user.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn fetch_iter<T: FromFalkor, C: Connection>(
        self,
        graph: &Graph<C>,
    ) -> Result<FalkorRows<T>, FalkorError> {
        Ok(FalkorRows::new(self.execute(graph)?))
    }
}

/// Convenience constructor — equivalent to [`GraphQuery::new`].
///
/// ```rust
/// # use falkor::query;
/// let q = query::query("MATCH (u:User) RETURN u");
/// assert_eq!(q.text(), "MATCH (u:User) RETURN u");
/// ```
pub fn query(q: impl Into<String>) -> GraphQuery {
    GraphQuery::new(q)
}
