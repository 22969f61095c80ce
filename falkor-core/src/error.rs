
//! Error types for reply decoding, schema resolution and typed conversions.

use thiserror::Error;

use crate::schema::SchemaKind;

/// Unified error type for all falkor operations.
///
/// Derive macros automatically wrap conversion errors with [`Context`](FalkorError::Context)
/// via [`with_context`](FalkorError::with_context), producing chained messages like:
///
/// ```text
/// Person::age (prop 'age'): type mismatch: expected Integer, got String (i64)
/// ```
#[derive(Error, Debug)]
pub enum FalkorError {
    /// The reply did not match the compact wire grammar.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The server referenced a schema id that introspection does not report,
    /// even after a refresh.
    #[error("unknown {table} id {id}")]
    UnknownSchemaId { table: SchemaKind, id: i64 },

    /// A record was indexed past its last column.
    #[error("index {index} out of range for record with {len} columns")]
    IndexOutOfRange { index: usize, len: usize },

    /// A general mapping error with a freeform message.
    #[error("mapping error: {0}")]
    Mapping(String),

    /// A required property was not found on a node or edge.
    #[error("missing property '{property}' on {label}")]
    MissingProperty { property: String, label: String },

    /// A required column was not found in a [`Record`](crate::Record).
    #[error("missing field '{field}' on {struct_name}")]
    MissingField { field: String, struct_name: String },

    /// A decoded [`Value`](crate::Value) variant did not match the expected Rust type.
    #[error("type mismatch: expected {expected}, got {got} ({context})")]
    TypeMismatch {
        expected: String,
        got: String,
        context: String,
    },

    /// Wraps an inner error with additional context (struct name, field, property).
    ///
    /// Created automatically by derive macros. Can also be created manually
    /// via [`with_context`](FalkorError::with_context).
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<FalkorError>,
    },

    /// An error surfaced by the transport that executed the command.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failures raised while walking a raw reply.
///
/// Every variant is terminal for the reply being decoded: no partial result
/// is ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A scalar cell carried a type tag outside the known set.
    #[error("unknown scalar type {0}")]
    UnknownScalarType(i64),

    /// A header entry carried a column category outside the known set.
    #[error("unknown column type {0}")]
    UnknownColumnType(i64),

    /// A cell did not have the shape its tag or position requires.
    #[error("expected {expected}, got {got} ({context})")]
    UnexpectedShape {
        expected: &'static str,
        got: &'static str,
        context: &'static str,
    },

    /// Numeric text in a double or point payload failed to parse.
    #[error("invalid number '{text}' in {context}")]
    InvalidNumber { text: String, context: &'static str },

    /// A boolean payload was neither `"true"` nor `"false"`.
    #[error("invalid boolean '{0}'")]
    InvalidBoolean(String),

    /// A string payload was not valid UTF-8.
    #[error("invalid utf-8 in {0}")]
    InvalidUtf8(&'static str),

    /// The top-level reply had neither one nor three elements.
    #[error("reply has {0} top-level elements, expected 1 or 3")]
    ReplyLength(usize),

    /// A row carried a different number of cells than the header has columns.
    #[error("row {row} has {cells} cells, header has {columns} columns")]
    RowWidth {
        row: usize,
        cells: usize,
        columns: usize,
    },

    /// A temporal payload does not fit the representable range.
    #[error("{kind} value {raw} is out of range")]
    TemporalOutOfRange { kind: &'static str, raw: i64 },
}

impl DecodeError {
    /// Create an [`UnexpectedShape`](DecodeError::UnexpectedShape) error.
    pub fn shape(expected: &'static str, got: &'static str, context: &'static str) -> Self {
        DecodeError::UnexpectedShape {
            expected,
            got,
            context,
        }
    }
}

impl FalkorError {
    /// Create a [`TypeMismatch`](FalkorError::TypeMismatch) error.
    pub fn type_mismatch(expected: &str, got: &str, context: &str) -> Self {
        FalkorError::TypeMismatch {
            expected: expected.to_owned(),
            got: got.to_owned(),
            context: context.to_owned(),
        }
    }

    /// Create a [`MissingProperty`](FalkorError::MissingProperty) error.
    pub fn missing_property(property: &str, label: &str) -> Self {
        FalkorError::MissingProperty {
            property: property.to_owned(),
            label: label.to_owned(),
        }
    }

    /// Create a [`MissingField`](FalkorError::MissingField) error.
    pub fn missing_field(field: &str, struct_name: &str) -> Self {
        FalkorError::MissingField {
            field: field.to_owned(),
            struct_name: struct_name.to_owned(),
        }
    }

    /// Box any transport failure into [`Transport`](FalkorError::Transport).
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        FalkorError::Transport(err.into())
    }

    /// Wrap this error with additional context, producing a [`Context`](FalkorError::Context) variant.
    ///
    /// The derive macros call this automatically to annotate errors with the
    /// struct name, field name, and property key so you can trace exactly
    /// where a conversion failed.
    ///
    /// ```rust
    /// # use falkor_core::FalkorError;
    /// let err = FalkorError::type_mismatch("Integer", "String", "i64");
    /// let wrapped = err.with_context("Person::age (prop 'age')");
    /// assert!(wrapped.to_string().contains("Person::age"));
    /// ```
    pub fn with_context(self, ctx: impl Into<String>) -> Self {
        FalkorError::Context {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}
