//! The record contract.
//!
//! A type stored in a collection implements [`VectorStoreRecord`]: it
//! declares its schema once via [`VectorStoreRecord::definition`] and exposes
//! plain accessors for its key, vectors, and filterable fields. This replaces
//! the attribute/reflection discovery of dynamic runtimes — the type itself
//! is the annotation.

use std::fmt::Debug;
use std::hash::Hash;

use crate::schema::RecordDefinition;
use crate::value::FieldValue;

/// Key type of a stored record.
///
/// `Ord` is required because equal-score search results are tie-broken by
/// ascending key for deterministic paging.
pub trait RecordKey: Eq + Ord + Hash + Clone + Debug + Send + Sync + 'static {}

impl<T: Eq + Ord + Hash + Clone + Debug + Send + Sync + 'static> RecordKey for T {}

/// A record storable in a `VectorCollection`.
///
/// Invariants the implementation must uphold:
/// - `key()` returns the value of the field declared with the key role.
/// - `vector(name)` returns `Some` for every vector field of `definition()`
///   that currently holds a value; `None` means the vector is absent and the
///   record is silently skipped by search.
/// - `field(name)` covers at least the key and every filterable data field;
///   `None` means the record type has no such field.
pub trait VectorStoreRecord: Clone + Send + Sync + 'static {
    /// Key type of this record.
    type Key: RecordKey;

    /// The record type's schema. Used when no explicit definition is handed
    /// to `get_collection`.
    fn definition() -> RecordDefinition;

    /// Read the record's key.
    fn key(&self) -> Self::Key;

    /// Read a vector field by logical name.
    fn vector(&self, name: &str) -> Option<&[f32]>;

    /// Read a key or data field by logical name, as a dynamic value.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Short type name for error messages.
    fn type_name() -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::functions;

    #[derive(Clone)]
    struct Doc {
        id: i64,
        title: String,
        embedding: Vec<f32>,
    }

    impl VectorStoreRecord for Doc {
        type Key = i64;

        fn definition() -> RecordDefinition {
            RecordDefinition::builder()
                .key("Id")
                .data("Title")
                .vector("Embedding", 3, functions::COSINE_SIMILARITY)
                .build()
        }

        fn key(&self) -> i64 {
            self.id
        }

        fn vector(&self, name: &str) -> Option<&[f32]> {
            match name {
                "Embedding" => Some(&self.embedding),
                _ => None,
            }
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "Id" => Some(self.id.into()),
                "Title" => Some(self.title.as_str().into()),
                _ => None,
            }
        }
    }

    #[test]
    fn accessors() {
        let doc = Doc {
            id: 7,
            title: "hello".to_string(),
            embedding: vec![1.0, 0.0, 0.0],
        };
        assert_eq!(doc.key(), 7);
        assert_eq!(doc.vector("Embedding"), Some(&[1.0f32, 0.0, 0.0][..]));
        assert_eq!(doc.vector("Other"), None);
        assert_eq!(doc.field("Title"), Some(FieldValue::from("hello")));
        assert_eq!(doc.field("Missing"), None);
    }

    #[test]
    fn short_type_name() {
        assert_eq!(Doc::type_name(), "Doc");
    }
}
