//! Row-by-row typed mapping over a decoded result set.

use std::marker::PhantomData;

use falkor_core::error::FalkorError;
use falkor_core::record::Record;
use falkor_core::result::ResultSet;
use falkor_core::stats::Statistics;
use falkor_core::traits::FromFalkor;

/// An iterator of query rows mapped via [`FromFalkor`].
///
/// Created by [`GraphQuery::fetch_iter`](crate::query::GraphQuery::fetch_iter).
/// Each call to `next()` maps the next record to `T`; a row that fails to
/// map yields an `Err` without ending the iteration.
pub struct FalkorRows<T> {
    records: std::vec::IntoIter<Record>,
    statistics: Statistics,
    _marker: PhantomData<T>,
}

impl<T: FromFalkor> FalkorRows<T> {
    pub(crate) fn new(result: ResultSet) -> Self {
        let statistics = result.statistics().clone();
        Self {
            records: result.into_iter(),
            statistics,
            _marker: PhantomData,
        }
    }

    /// Statistics of the query that produced these rows.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}

impl<T: FromFalkor> Iterator for FalkorRows<T> {
    type Item = Result<T, FalkorError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|record| T::from_record(&record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl<T: FromFalkor> ExactSizeIterator for FalkorRows<T> {}
