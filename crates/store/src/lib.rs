//! In-memory vector storage for VolaDB.
//!
//! [`VectorStore`] owns the concurrent collection registry;
//! [`VectorCollection`] is a typed handle over one named collection with
//! record CRUD and brute-force vector search; [`SchemaReader`] resolves and
//! validates record schemas.

#![warn(missing_docs)]

pub mod collection;
pub mod registry;
pub mod schema;

pub use collection::VectorCollection;
pub use registry::{CollectionOptions, VectorStore};
pub use schema::{SchemaReader, SchemaReaderOptions};
