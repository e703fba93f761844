//! One-stop imports for typical use.
//!
//! ```
//! use voladb::prelude::*;
//! ```

pub use vola_core::distance::functions as distance;
pub use vola_core::error::{VectorStoreError, VectorStoreResult};
pub use vola_core::filter::{FilterClause, VectorSearchFilter};
pub use vola_core::record::{RecordKey, VectorStoreRecord};
pub use vola_core::schema::{FieldDefinition, FieldRole, NamingPolicy, RecordDefinition};
pub use vola_core::search::{
    QueryVector, VectorSearchOptions, VectorSearchResult, VectorSearchResults,
};
pub use vola_core::value::FieldValue;
pub use vola_store::{CollectionOptions, SchemaReaderOptions, VectorCollection, VectorStore};
