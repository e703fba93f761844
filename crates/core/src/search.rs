//! Search request and response types.

use std::sync::Arc;

use crate::filter::VectorSearchFilter;

/// Default page size when the caller does not set `top`.
pub const DEFAULT_TOP: usize = 3;

/// A query vector handed to `search`.
///
/// The store itself only compares `f32` embeddings; the `F64` variant exists
/// so callers holding double-precision embeddings get a typed
/// `UnsupportedVectorType` error instead of a silent lossy cast.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryVector {
    /// Single-precision embedding. The only shape this store searches with.
    F32(Vec<f32>),
    /// Double-precision embedding. Not supported by this store.
    F64(Vec<f64>),
}

impl QueryVector {
    /// Human-readable shape name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            QueryVector::F32(_) => "f32",
            QueryVector::F64(_) => "f64",
        }
    }

    /// The query as an `f32` slice, if it has that shape.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            QueryVector::F32(v) => Some(v),
            QueryVector::F64(_) => None,
        }
    }
}

impl From<Vec<f32>> for QueryVector {
    fn from(v: Vec<f32>) -> Self {
        QueryVector::F32(v)
    }
}

impl From<&[f32]> for QueryVector {
    fn from(v: &[f32]) -> Self {
        QueryVector::F32(v.to_vec())
    }
}

impl From<Vec<f64>> for QueryVector {
    fn from(v: Vec<f64>) -> Self {
        QueryVector::F64(v)
    }
}

/// Arbitrary predicate filter over records.
pub type RecordPredicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Options for a vector search.
///
/// At most one of [`filter`](Self::filter) (predicate) and
/// [`clause_filter`](Self::clause_filter) (clause list) may be set; setting
/// both fails the search with `ConflictingFilter`.
#[derive(Clone)]
pub struct VectorSearchOptions<R> {
    /// Vector field to search. Required only when the record type has more
    /// than one vector field.
    pub vector_field: Option<String>,
    /// Predicate filter applied before vector comparison.
    pub filter: Option<RecordPredicate<R>>,
    /// Clause-list filter applied before vector comparison.
    pub clause_filter: Option<VectorSearchFilter>,
    /// Number of results to skip before the page. Default 0.
    pub skip: usize,
    /// Page size. Default [`DEFAULT_TOP`].
    pub top: usize,
    /// Whether to eagerly count all post-filter results before paging.
    pub include_total_count: bool,
}

impl<R> Default for VectorSearchOptions<R> {
    fn default() -> Self {
        Self {
            vector_field: None,
            filter: None,
            clause_filter: None,
            skip: 0,
            top: DEFAULT_TOP,
            include_total_count: false,
        }
    }
}

impl<R> VectorSearchOptions<R> {
    /// Options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the vector field to search by logical name.
    pub fn with_vector_field(mut self, name: impl Into<String>) -> Self {
        self.vector_field = Some(name.into());
        self
    }

    /// Set the predicate filter.
    pub fn with_filter(mut self, filter: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Set the clause-list filter.
    pub fn with_clause_filter(mut self, filter: VectorSearchFilter) -> Self {
        self.clause_filter = Some(filter);
        self
    }

    /// Set the number of results to skip.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Set the page size.
    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    /// Request the eager total count.
    pub fn with_total_count(mut self) -> Self {
        self.include_total_count = true;
        self
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSearchResult<R> {
    /// The matched record.
    pub record: R,
    /// Converted score under the vector field's distance function.
    pub score: f64,
}

/// An ordered page of search hits.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSearchResults<R> {
    /// Hits in similarity order, already paged by `skip`/`top`.
    pub results: Vec<VectorSearchResult<R>>,
    /// Count of all post-filter results, when requested. Independent of
    /// paging.
    pub total_count: Option<i64>,
}

impl<R> VectorSearchResults<R> {
    /// Iterate over the hits.
    pub fn iter(&self) -> std::slice::Iter<'_, VectorSearchResult<R>> {
        self.results.iter()
    }
}

impl<R> IntoIterator for VectorSearchResults<R> {
    type Item = VectorSearchResult<R>;
    type IntoIter = std::vec::IntoIter<VectorSearchResult<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
