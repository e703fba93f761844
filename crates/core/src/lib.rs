//! Core types for VolaDB.
//!
//! This crate defines the record contract, schema declarations, distance
//! functions, the filter clause language, and the search option/result
//! types. Storage lives in `vola-store`.

#![warn(missing_docs)]

pub mod distance;
pub mod error;
pub mod filter;
pub mod record;
pub mod schema;
pub mod search;
pub mod value;

pub use error::{VectorStoreError, VectorStoreResult};
pub use filter::{FilterClause, VectorSearchFilter};
pub use record::{RecordKey, VectorStoreRecord};
pub use schema::{
    FieldDefinition, FieldRole, NamingPolicy, RecordDefinition, RecordDefinitionBuilder,
};
pub use search::{
    QueryVector, RecordPredicate, VectorSearchOptions, VectorSearchResult, VectorSearchResults,
    DEFAULT_TOP,
};
pub use value::FieldValue;
