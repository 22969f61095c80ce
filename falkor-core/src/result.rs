
//! Result set assembly and the forward-only record cursor.

use std::sync::Arc;

use tracing::trace;

use crate::decode::{ColumnKind, ReplyDecoder};
use crate::error::{DecodeError, FalkorError};
use crate::raw::RawCell;
use crate::record::Record;
use crate::schema::{GraphSchema, SchemaSource};
use crate::stats::Statistics;

/// Column names and categories of a result set, in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    names: Arc<[String]>,
    kinds: Vec<ColumnKind>,
}

impl Header {
    fn from_cell(cell: RawCell) -> Result<Self, DecodeError> {
        let columns = cell.into_seq("header")?;
        let mut names = Vec::with_capacity(columns.len());
        let mut kinds = Vec::with_capacity(columns.len());
        for column in columns {
            let [kind, name] = column.into_array::<2>("header column")?;
            kinds.push(ColumnKind::try_from(kind.into_int("column type")?)?);
            names.push(name.into_text("column name")?);
        }
        Ok(Header {
            names: names.into(),
            kinds,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    BeforeFirst,
    At(usize),
    Exhausted,
}

/// The decoded result of one query.
///
/// Header, records and statistics are immutable once assembled; only the
/// cursor moves.
#[derive(Debug, Clone)]
pub struct ResultSet {
    header: Header,
    records: Vec<Record>,
    statistics: Statistics,
    cursor: Cursor,
}

/// Decode a complete reply into a [`ResultSet`].
///
/// A one-element reply carries statistics only; otherwise the reply must be
/// `[header, rows, statistics]`. Any failure while decoding a row aborts the
/// whole assembly.
pub fn assemble(
    reply: RawCell,
    schema: &GraphSchema,
    source: &dyn SchemaSource,
) -> Result<ResultSet, FalkorError> {
    let [header, rows, stats] = match <[RawCell; 3]>::try_from(reply.into_seq("reply")?) {
        Ok(parts) => parts,
        Err(parts) => {
            return match <[RawCell; 1]>::try_from(parts) {
                Ok([stats]) => {
                    let statistics = Statistics::from_cell(stats)?;
                    Ok(ResultSet::new(Header::default(), Vec::new(), statistics))
                }
                Err(parts) => Err(DecodeError::ReplyLength(parts.len()).into()),
            };
        }
    };

    let header = Header::from_cell(header)?;
    let decoder = ReplyDecoder::new(schema, source);
    let records = decode_rows(&decoder, &header, rows)?;
    let statistics = Statistics::from_cell(stats)?;
    trace!(rows = records.len(), columns = header.len(), "result.assemble");
    Ok(ResultSet::new(header, records, statistics))
}

fn decode_rows(
    decoder: &ReplyDecoder<'_>,
    header: &Header,
    rows: RawCell,
) -> Result<Vec<Record>, FalkorError> {
    let rows = rows.into_seq("rows")?;
    let mut records = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.into_iter().enumerate() {
        let cells = row.into_seq("row")?;
        if cells.len() != header.len() {
            return Err(DecodeError::RowWidth {
                row: row_idx,
                cells: cells.len(),
                columns: header.len(),
            }
            .into());
        }
        let values = cells
            .into_iter()
            .zip(header.kinds())
            .map(|(cell, kind)| decoder.decode_cell(*kind, cell))
            .collect::<Result<Vec<_>, _>>()?;
        records.push(Record::new(values, Arc::clone(&header.names)));
    }
    Ok(records)
}

impl ResultSet {
    fn new(header: Header, records: Vec<Record>, statistics: Statistics) -> Self {
        ResultSet {
            header,
            records,
            statistics,
            cursor: Cursor::BeforeFirst,
        }
    }

    /// True when the query produced no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Move to the next record. Returns `false` once the rows are exhausted,
    /// and keeps returning `false` afterwards.
    pub fn advance(&mut self) -> bool {
        let next = match self.cursor {
            Cursor::BeforeFirst => 0,
            Cursor::At(i) => i + 1,
            Cursor::Exhausted => return false,
        };
        if next < self.records.len() {
            self.cursor = Cursor::At(next);
            true
        } else {
            self.cursor = Cursor::Exhausted;
            false
        }
    }

    /// Record under the cursor; `None` before the first [`advance`](Self::advance)
    /// and after exhaustion.
    pub fn current(&self) -> Option<&Record> {
        match self.cursor {
            Cursor::At(i) => self.records.get(i),
            Cursor::BeforeFirst | Cursor::Exhausted => None,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn column_names(&self) -> &[String] {
        self.header.names()
    }

    pub fn column_kinds(&self) -> &[ColumnKind] {
        self.header.kinds()
    }

    /// All records regardless of the cursor.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Raw statistic by its literal name, 0 when absent.
    pub fn stat(&self, name: &str) -> f64 {
        self.statistics.get(name)
    }

    pub fn labels_added(&self) -> u64 {
        self.statistics.labels_added()
    }

    pub fn nodes_created(&self) -> u64 {
        self.statistics.nodes_created()
    }

    pub fn nodes_deleted(&self) -> u64 {
        self.statistics.nodes_deleted()
    }

    pub fn relationships_created(&self) -> u64 {
        self.statistics.relationships_created()
    }

    pub fn relationships_deleted(&self) -> u64 {
        self.statistics.relationships_deleted()
    }

    pub fn properties_set(&self) -> u64 {
        self.statistics.properties_set()
    }

    pub fn indices_created(&self) -> u64 {
        self.statistics.indices_created()
    }

    pub fn indices_deleted(&self) -> u64 {
        self.statistics.indices_deleted()
    }

    pub fn cached_execution(&self) -> bool {
        self.statistics.cached_execution()
    }

    /// Server-side execution time in milliseconds.
    pub fn internal_execution_time(&self) -> f64 {
        self.statistics.internal_execution_time()
    }
}

impl IntoIterator for ResultSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    /// Consumes every record, ignoring the cursor.
    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
