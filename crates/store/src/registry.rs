//! The store registry: named collections plus name-to-type bindings.

use std::any::TypeId;
use std::sync::Arc;

use vola_core::error::{VectorStoreError, VectorStoreResult};
use vola_core::record::VectorStoreRecord;
use vola_core::schema::RecordDefinition;

use crate::collection::{Shared, VectorCollection};
use crate::schema::{SchemaReader, SchemaReaderOptions};

/// Per-handle configuration for [`VectorStore::get_collection_with_options`].
#[derive(Debug, Clone, Default)]
pub struct CollectionOptions {
    /// Explicit record definition. When `None`, the record type's own
    /// `definition()` is used.
    pub definition: Option<RecordDefinition>,
    /// Schema resolution rules.
    pub reader: SchemaReaderOptions,
}

/// An in-memory vector store.
///
/// Cloning is cheap and every clone sees the same collections. A collection
/// name is bound to one record type on creation; requesting a handle under a
/// different type fails with `TypeConflict`.
#[derive(Clone, Default)]
pub struct VectorStore {
    shared: Arc<Shared>,
}

impl VectorStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a typed handle to a named collection, using `R`'s own schema.
    ///
    /// The handle is just a view; the collection itself is created with
    /// [`VectorCollection::create_collection`].
    pub fn get_collection<R: VectorStoreRecord>(
        &self,
        name: &str,
    ) -> VectorStoreResult<VectorCollection<R>> {
        self.get_collection_with_options(name, CollectionOptions::default())
    }

    /// Get a typed handle with an explicit record definition.
    pub fn get_collection_with_definition<R: VectorStoreRecord>(
        &self,
        name: &str,
        definition: RecordDefinition,
    ) -> VectorStoreResult<VectorCollection<R>> {
        self.get_collection_with_options(
            name,
            CollectionOptions {
                definition: Some(definition),
                ..Default::default()
            },
        )
    }

    /// Get a typed handle with full configuration.
    pub fn get_collection_with_options<R: VectorStoreRecord>(
        &self,
        name: &str,
        options: CollectionOptions,
    ) -> VectorStoreResult<VectorCollection<R>> {
        if let Some(binding) = self.shared.types.get(name) {
            if binding.type_id != TypeId::of::<R>() {
                return Err(VectorStoreError::TypeConflict {
                    name: name.to_string(),
                    existing: binding.type_name,
                    requested: R::type_name(),
                });
            }
        }
        let schema = SchemaReader::resolve::<R>(options.definition, options.reader)?;
        Ok(VectorCollection::new(
            Arc::clone(&self.shared),
            name.to_string(),
            Arc::new(schema),
        ))
    }

    /// Names of all existing collections, in no particular order.
    pub fn list_collection_names(&self) -> Vec<String> {
        self.shared
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vola_core::distance::functions;
    use vola_core::value::FieldValue;

    #[derive(Clone)]
    struct Doc {
        id: i64,
        embedding: Vec<f32>,
    }

    impl VectorStoreRecord for Doc {
        type Key = i64;

        fn definition() -> RecordDefinition {
            RecordDefinition::builder()
                .key("Id")
                .vector("Embedding", 2, functions::COSINE_SIMILARITY)
                .build()
        }

        fn key(&self) -> i64 {
            self.id
        }

        fn vector(&self, name: &str) -> Option<&[f32]> {
            (name == "Embedding").then_some(self.embedding.as_slice())
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            (name == "Id").then(|| self.id.into())
        }
    }

    #[derive(Clone)]
    struct Note {
        id: String,
        embedding: Vec<f32>,
    }

    impl VectorStoreRecord for Note {
        type Key = String;

        fn definition() -> RecordDefinition {
            RecordDefinition::builder()
                .key("Id")
                .vector("Embedding", 2, functions::COSINE_SIMILARITY)
                .build()
        }

        fn key(&self) -> String {
            self.id.clone()
        }

        fn vector(&self, name: &str) -> Option<&[f32]> {
            (name == "Embedding").then_some(self.embedding.as_slice())
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            (name == "Id").then(|| self.id.as_str().into())
        }
    }

    #[test]
    fn clones_share_state() {
        let store = VectorStore::new();
        let docs = store.get_collection::<Doc>("docs").unwrap();
        docs.create_collection().unwrap();

        let other = store.clone();
        let view = other.get_collection::<Doc>("docs").unwrap();
        assert!(view.collection_exists());
        view.upsert(Doc {
            id: 1,
            embedding: vec![1.0, 0.0],
        })
        .unwrap();
        assert!(docs.get(&1).unwrap().is_some());
    }

    #[test]
    fn name_is_bound_to_one_type() {
        let store = VectorStore::new();
        store
            .get_collection::<Doc>("items")
            .unwrap()
            .create_collection()
            .unwrap();

        let err = store.get_collection::<Note>("items").unwrap_err();
        assert_eq!(
            err,
            VectorStoreError::TypeConflict {
                name: "items".to_string(),
                existing: "Doc",
                requested: "Note",
            }
        );

        // Deleting the collection releases the binding.
        store
            .get_collection::<Doc>("items")
            .unwrap()
            .delete_collection()
            .unwrap();
        assert!(store.get_collection::<Note>("items").is_ok());
    }

    #[test]
    fn handle_before_create_does_not_bind() {
        let store = VectorStore::new();
        // A handle alone binds nothing; another type can still claim the name.
        let _docs = store.get_collection::<Doc>("scratch").unwrap();
        let notes = store.get_collection::<Note>("scratch").unwrap();
        notes.create_collection().unwrap();
        assert!(store.get_collection::<Doc>("scratch").is_err());
    }

    #[test]
    fn list_collection_names() {
        let store = VectorStore::new();
        assert!(store.list_collection_names().is_empty());
        store
            .get_collection::<Doc>("a")
            .unwrap()
            .create_collection()
            .unwrap();
        store
            .get_collection::<Doc>("b")
            .unwrap()
            .create_collection()
            .unwrap();
        let mut names = store.list_collection_names();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn explicit_definition_overrides_derived() {
        let store = VectorStore::new();
        let definition = RecordDefinition::builder()
            .key("Id")
            .vector("Embedding", 2, functions::EUCLIDEAN_DISTANCE)
            .build();
        let docs = store
            .get_collection_with_definition::<Doc>("docs", definition)
            .unwrap();
        assert_eq!(
            docs.schema().vector_fields()[0].distance_function.as_deref(),
            Some(functions::EUCLIDEAN_DISTANCE)
        );
    }
}
