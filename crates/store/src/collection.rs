//! Typed collection handles over the shared concurrent store.
//!
//! A [`VectorCollection`] is a cheap, cloneable view: the records live in a
//! type-erased map owned by the store, and every operation resolves that map
//! on entry. Handles stay valid across create/delete cycles of the
//! underlying collection.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use vola_core::distance::{compare_vectors, convert_score, should_sort_descending};
use vola_core::error::{VectorStoreError, VectorStoreResult};
use vola_core::record::VectorStoreRecord;
use vola_core::search::{QueryVector, VectorSearchOptions, VectorSearchResult, VectorSearchResults};

use crate::schema::SchemaReader;

/// The record type a collection name is bound to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TypeBinding {
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl TypeBinding {
    pub(crate) fn of<R: VectorStoreRecord>() -> Self {
        Self {
            type_id: TypeId::of::<R>(),
            type_name: R::type_name(),
        }
    }
}

/// Store state shared by every handle: the record maps and the name-to-type
/// bindings, keyed by collection name.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    pub collections: DashMap<String, Arc<dyn Any + Send + Sync>>,
    pub types: DashMap<String, TypeBinding>,
}

/// A typed handle to one named collection.
pub struct VectorCollection<R: VectorStoreRecord> {
    shared: Arc<Shared>,
    name: String,
    schema: Arc<SchemaReader>,
    _record: PhantomData<fn() -> R>,
}

impl<R: VectorStoreRecord> std::fmt::Debug for VectorCollection<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorCollection")
            .field("name", &self.name)
            .field("record_type", &R::type_name())
            .finish()
    }
}

impl<R: VectorStoreRecord> Clone for VectorCollection<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            name: self.name.clone(),
            schema: Arc::clone(&self.schema),
            _record: PhantomData,
        }
    }
}

impl<R: VectorStoreRecord> VectorCollection<R> {
    pub(crate) fn new(shared: Arc<Shared>, name: String, schema: Arc<SchemaReader>) -> Self {
        Self {
            shared,
            name,
            schema,
            _record: PhantomData,
        }
    }

    /// The collection's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved schema this handle operates under.
    pub fn schema(&self) -> &SchemaReader {
        &self.schema
    }

    /// Whether the collection currently exists in the store.
    pub fn collection_exists(&self) -> bool {
        self.shared.collections.contains_key(&self.name)
    }

    /// Create the collection. Fails if a collection of the same name already
    /// exists, regardless of its record type.
    pub fn create_collection(&self) -> VectorStoreResult<()> {
        match self.shared.collections.entry(self.name.clone()) {
            Entry::Occupied(_) => Err(VectorStoreError::CollectionAlreadyExists {
                name: self.name.clone(),
            }),
            Entry::Vacant(slot) => {
                // Keep the entry guard alive until the type binding is in
                // place; delete_collection pairs the removals the same way.
                let guard = slot.insert(Arc::new(DashMap::<R::Key, R>::new()));
                self.shared
                    .types
                    .insert(self.name.clone(), TypeBinding::of::<R>());
                drop(guard);
                tracing::debug!(collection = %self.name, "collection created");
                Ok(())
            }
        }
    }

    /// Create the collection unless it already exists. A concurrent create
    /// winning the race is not an error.
    pub fn create_collection_if_not_exists(&self) -> VectorStoreResult<()> {
        match self.create_collection() {
            Err(VectorStoreError::CollectionAlreadyExists { .. }) => Ok(()),
            other => other,
        }
    }

    /// Delete the collection and its records. Deleting a collection that
    /// does not exist is a no-op.
    pub fn delete_collection(&self) -> VectorStoreResult<()> {
        // Both removals happen under the collections entry so a concurrent
        // create of the same name cannot lose its type binding.
        match self.shared.collections.entry(self.name.clone()) {
            Entry::Occupied(entry) => {
                self.shared.types.remove(&self.name);
                entry.remove();
                tracing::debug!(collection = %self.name, "collection deleted");
            }
            Entry::Vacant(_) => {}
        }
        Ok(())
    }

    /// Fetch one record by key. `None` when the key is not present.
    pub fn get(&self, key: &R::Key) -> VectorStoreResult<Option<R>> {
        let records = self.records()?;
        Ok(records.get(key).map(|entry| entry.value().clone()))
    }

    /// Fetch records for the given keys, in caller order. Missing keys are
    /// skipped, not errors.
    pub fn get_batch<I>(&self, keys: I) -> VectorStoreResult<Vec<R>>
    where
        I: IntoIterator<Item = R::Key>,
    {
        let records = self.records()?;
        Ok(keys
            .into_iter()
            .filter_map(|key| records.get(&key).map(|entry| entry.value().clone()))
            .collect())
    }

    /// Delete one record by key. Absent keys succeed silently.
    pub fn delete(&self, key: &R::Key) -> VectorStoreResult<()> {
        let records = self.records()?;
        records.remove(key);
        Ok(())
    }

    /// Delete records for the given keys. Absent keys succeed silently.
    pub fn delete_batch<I>(&self, keys: I) -> VectorStoreResult<()>
    where
        I: IntoIterator<Item = R::Key>,
    {
        let records = self.records()?;
        for key in keys {
            records.remove(&key);
        }
        Ok(())
    }

    /// Insert or replace one record, returning its key.
    pub fn upsert(&self, record: R) -> VectorStoreResult<R::Key> {
        let records = self.records()?;
        let key = record.key();
        records.insert(key.clone(), record);
        Ok(key)
    }

    /// Insert or replace a batch of records, returning their keys in input
    /// order. Duplicate keys within the batch resolve last-write-wins.
    pub fn upsert_batch<I>(&self, batch: I) -> VectorStoreResult<Vec<R::Key>>
    where
        I: IntoIterator<Item = R>,
    {
        let records = self.records()?;
        let mut keys = Vec::new();
        for record in batch {
            let key = record.key();
            records.insert(key.clone(), record);
            keys.push(key);
        }
        Ok(keys)
    }

    /// Search the collection with the given query vector.
    ///
    /// Pipeline: snapshot the records, apply the filter, score every record
    /// that holds the target vector, count (if requested), sort by score
    /// with ascending-key tie-break, then page with `skip`/`top`.
    pub fn search(
        &self,
        query: impl Into<QueryVector>,
        options: VectorSearchOptions<R>,
    ) -> VectorStoreResult<VectorSearchResults<R>> {
        let query = query.into();
        let query_vector =
            query
                .as_f32()
                .ok_or_else(|| VectorStoreError::UnsupportedVectorType {
                    type_name: query.type_name(),
                })?;
        let vector_field = self.schema.select_vector_field(options.vector_field.as_deref())?;
        let distance_function = vector_field.distance_function.as_deref();

        let records = self.records()?;
        let snapshot: Vec<R> = records.iter().map(|entry| entry.value().clone()).collect();
        drop(records);

        let filtered: Vec<R> = match (&options.filter, &options.clause_filter) {
            (Some(_), Some(_)) => return Err(VectorStoreError::ConflictingFilter),
            (Some(predicate), None) => snapshot.into_iter().filter(|r| predicate(r)).collect(),
            (None, Some(filter)) => {
                let mut kept = Vec::with_capacity(snapshot.len());
                for record in snapshot {
                    if filter.matches(&record)? {
                        kept.push(record);
                    }
                }
                kept
            }
            (None, None) => snapshot,
        };

        let mut scored: Vec<(R::Key, f64, R)> = Vec::with_capacity(filtered.len());
        let mut without_vector = 0usize;
        for record in filtered {
            let score = match record.vector(&vector_field.name) {
                Some(stored) => {
                    let raw = compare_vectors(query_vector, stored, distance_function)?;
                    convert_score(raw, distance_function)?
                }
                None => {
                    without_vector += 1;
                    continue;
                }
            };
            scored.push((record.key(), score, record));
        }
        if without_vector > 0 {
            tracing::debug!(
                collection = %self.name,
                skipped = without_vector,
                "records without a vector value excluded from search"
            );
        }

        // The total covers everything that was scored, independent of paging.
        let total_count = options.include_total_count.then(|| scored.len() as i64);

        let descending = should_sort_descending(distance_function)?;
        scored.sort_by(|a, b| score_order(a.1, b.1, descending).then_with(|| a.0.cmp(&b.0)));

        let results: Vec<VectorSearchResult<R>> = scored
            .into_iter()
            .skip(options.skip)
            .take(options.top)
            .map(|(_, score, record)| VectorSearchResult { record, score })
            .collect();

        tracing::debug!(
            collection = %self.name,
            hits = results.len(),
            total = ?total_count,
            "search completed"
        );

        Ok(VectorSearchResults {
            results,
            total_count,
        })
    }

    /// Resolve the live record map for this handle.
    fn records(&self) -> VectorStoreResult<Arc<DashMap<R::Key, R>>> {
        let entry = self
            .shared
            .collections
            .get(&self.name)
            .ok_or_else(|| VectorStoreError::CollectionNotFound {
                name: self.name.clone(),
            })?;
        let map = Arc::clone(entry.value());
        drop(entry);
        map.downcast::<DashMap<R::Key, R>>().map_err(|_| {
            match self.shared.types.get(&self.name) {
                Some(binding) => VectorStoreError::TypeConflict {
                    name: self.name.clone(),
                    existing: binding.type_name,
                    requested: R::type_name(),
                },
                // Binding gone: the collection was deleted after we fetched
                // the record map.
                None => VectorStoreError::CollectionNotFound {
                    name: self.name.clone(),
                },
            }
        })
    }
}

/// Order two scores for the final result sequence. NaN sorts after every
/// real score in either direction, so zero-vector cosine results land at
/// the end instead of poisoning the page.
fn score_order(a: f64, b: f64, descending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            if descending {
                b.total_cmp(&a)
            } else {
                a.total_cmp(&b)
            }
        }
    }
}
