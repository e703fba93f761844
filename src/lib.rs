//! # VolaDB
//!
//! An embedded, in-memory vector record store for AI assistants.
//!
//! Records are plain Rust types implementing
//! [`VectorStoreRecord`](vola_core::record::VectorStoreRecord): each type
//! declares a schema (one key, data fields, one or more `f32` embedding
//! vectors) and the store provides typed collections with CRUD plus exact
//! brute-force similarity search under cosine, dot-product, and Euclidean
//! distance functions.
//!
//! ```
//! use voladb::prelude::*;
//!
//! #[derive(Clone)]
//! struct Snippet {
//!     id: i64,
//!     text: String,
//!     embedding: Vec<f32>,
//! }
//!
//! impl VectorStoreRecord for Snippet {
//!     type Key = i64;
//!
//!     fn definition() -> RecordDefinition {
//!         RecordDefinition::builder()
//!             .key("Id")
//!             .data("Text")
//!             .vector("Embedding", 2, distance::COSINE_SIMILARITY)
//!             .build()
//!     }
//!
//!     fn key(&self) -> i64 {
//!         self.id
//!     }
//!
//!     fn vector(&self, name: &str) -> Option<&[f32]> {
//!         (name == "Embedding").then_some(self.embedding.as_slice())
//!     }
//!
//!     fn field(&self, name: &str) -> Option<FieldValue> {
//!         match name {
//!             "Id" => Some(self.id.into()),
//!             "Text" => Some(self.text.as_str().into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! # fn main() -> VectorStoreResult<()> {
//! let store = VectorStore::new();
//! let snippets = store.get_collection::<Snippet>("snippets")?;
//! snippets.create_collection()?;
//! snippets.upsert(Snippet {
//!     id: 1,
//!     text: "hello".to_string(),
//!     embedding: vec![1.0, 0.0],
//! })?;
//!
//! let results = snippets.search(vec![1.0f32, 0.0], VectorSearchOptions::new().with_top(1))?;
//! assert_eq!(results.results[0].record.id, 1);
//! # Ok(())
//! # }
//! ```
//!
//! Collections are concurrent: handles are cheap clones sharing one store,
//! and searches run against a point-in-time snapshot of the records.

#![warn(missing_docs)]

pub use vola_core::distance::{self, compare_vectors, convert_score, should_sort_descending};
pub use vola_core::error::{VectorStoreError, VectorStoreResult};
pub use vola_core::filter::{FilterClause, VectorSearchFilter};
pub use vola_core::record::{RecordKey, VectorStoreRecord};
pub use vola_core::schema::{
    FieldDefinition, FieldRole, NamingPolicy, RecordDefinition, RecordDefinitionBuilder,
};
pub use vola_core::search::{
    QueryVector, RecordPredicate, VectorSearchOptions, VectorSearchResult, VectorSearchResults,
    DEFAULT_TOP,
};
pub use vola_core::value::FieldValue;
pub use vola_store::{
    CollectionOptions, SchemaReader, SchemaReaderOptions, VectorCollection, VectorStore,
};

pub mod prelude;
