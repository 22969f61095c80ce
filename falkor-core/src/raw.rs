
//! Untyped reply cells as handed over by the transport.
//!
//! The transport decodes the wire into nested sequences of integers and
//! strings. That structure is converted exactly once into [`RawCell`], and
//! every decoder step afterwards dispatches on this closed enum.

use bytes::Bytes;

use crate::error::DecodeError;

/// One node of an untyped reply tree.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Nil reply.
    Null,
    /// Bulk or simple string. Kept as raw bytes until a tag says it is text.
    Str(Bytes),
    /// Integer reply.
    Int(i64),
    /// Double reply (RESP3 transports deliver vector elements this way).
    Double(f64),
    /// Nested array reply.
    Seq(Vec<RawCell>),
}

impl RawCell {
    /// Build a string cell from anything convertible to [`Bytes`].
    pub fn str(s: impl Into<Bytes>) -> Self {
        RawCell::Str(s.into())
    }

    /// Build a sequence cell.
    pub fn seq(items: impl IntoIterator<Item = RawCell>) -> Self {
        RawCell::Seq(items.into_iter().collect())
    }

    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            RawCell::Null => "Null",
            RawCell::Str(_) => "Str",
            RawCell::Int(_) => "Int",
            RawCell::Double(_) => "Double",
            RawCell::Seq(_) => "Seq",
        }
    }

    pub(crate) fn into_int(self, context: &'static str) -> Result<i64, DecodeError> {
        match self {
            RawCell::Int(i) => Ok(i),
            other => Err(DecodeError::shape("Int", other.type_name(), context)),
        }
    }

    pub(crate) fn into_seq(self, context: &'static str) -> Result<Vec<RawCell>, DecodeError> {
        match self {
            RawCell::Seq(items) => Ok(items),
            other => Err(DecodeError::shape("Seq", other.type_name(), context)),
        }
    }

    /// Consume a string cell as UTF-8 text.
    pub fn into_text(self, context: &'static str) -> Result<String, DecodeError> {
        match self {
            RawCell::Str(b) => String::from_utf8(b.to_vec()).map_err(|_| DecodeError::InvalidUtf8(context)),
            other => Err(DecodeError::shape("Str", other.type_name(), context)),
        }
    }

    /// Split a sequence into exactly `N` cells.
    pub fn into_array<const N: usize>(
        self,
        context: &'static str,
    ) -> Result<[RawCell; N], DecodeError> {
        let items = self.into_seq(context)?;
        <[RawCell; N]>::try_from(items).map_err(|_| DecodeError::shape("Seq of fixed width", "Seq", context))
    }
}

impl From<i64> for RawCell {
    fn from(v: i64) -> Self {
        RawCell::Int(v)
    }
}

impl From<&'static str> for RawCell {
    fn from(s: &'static str) -> Self {
        RawCell::Str(Bytes::from_static(s.as_bytes()))
    }
}

impl From<String> for RawCell {
    fn from(s: String) -> Self {
        RawCell::Str(Bytes::from(s))
    }
}

impl From<f64> for RawCell {
    fn from(v: f64) -> Self {
        RawCell::Double(v)
    }
}

impl From<Vec<RawCell>> for RawCell {
    fn from(items: Vec<RawCell>) -> Self {
        RawCell::Seq(items)
    }
}
