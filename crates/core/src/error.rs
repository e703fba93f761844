//! Error types for VolaDB.
//!
//! One enum covers the whole store: schema validation, caller-input errors,
//! collection state preconditions, and per-call configuration errors. No
//! operation in this crate retries; a caller that wants retries must decide
//! per variant whether the state can be fixed first.

use thiserror::Error;

/// All VolaDB errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VectorStoreError {
    /// Malformed or ambiguous record schema (wrong number of key or vector
    /// fields). Surfaced at collection creation or first search.
    #[error("invalid schema for record type {type_name}: {reason}")]
    Schema {
        /// Record type the schema was derived for
        type_name: String,
        /// What failed validation
        reason: String,
    },

    /// A filter clause or search option referenced a field that does not
    /// exist on the record type.
    #[error("field not found: {field}")]
    FieldNotFound {
        /// The missing field name
        field: String,
    },

    /// The record type has more than one vector field and the search options
    /// did not name one.
    #[error("record type {type_name} has multiple vector fields, specify one in the search options")]
    AmbiguousVectorField {
        /// Record type being searched
        type_name: String,
    },

    /// A filter clause was applied to a field of the wrong shape.
    #[error("field {field} has type {actual}, expected {expected}")]
    TypeMismatch {
        /// Field the clause referenced
        field: String,
        /// Expected value shape
        expected: &'static str,
        /// Actual value shape found on the record
        actual: &'static str,
    },

    /// A wire-form filter carried a clause kind this store does not know.
    #[error("unsupported filter clause kind: {kind}")]
    UnsupportedFilter {
        /// The unknown clause kind
        kind: String,
    },

    /// Operation on a collection that has not been created.
    #[error("collection not found: {name}")]
    CollectionNotFound {
        /// Collection name
        name: String,
    },

    /// `create_collection` on a name that already holds a collection.
    #[error("collection already exists: {name}")]
    CollectionAlreadyExists {
        /// Collection name
        name: String,
    },

    /// A collection name is bound to a different record type.
    #[error("collection '{name}' already exists with record type {existing}, cannot be re-created with record type {requested}")]
    TypeConflict {
        /// Collection name
        name: String,
        /// Record type the name is bound to
        existing: &'static str,
        /// Record type the caller asked for
        requested: &'static str,
    },

    /// A distance function tag that this store does not implement.
    #[error("unsupported distance function: {name}")]
    UnsupportedDistanceFunction {
        /// The unknown function tag
        name: String,
    },

    /// A query vector shape this store cannot search with.
    #[error("unsupported query vector type: {type_name}")]
    UnsupportedVectorType {
        /// Human-readable name of the rejected shape
        type_name: &'static str,
    },

    /// Both the predicate filter and the clause-list filter were supplied.
    #[error("either the predicate filter or the clause filter can be specified, but not both")]
    ConflictingFilter,

    /// Comparator inputs of unequal length.
    #[error("vector dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Length of the query vector
        expected: usize,
        /// Length of the stored vector
        got: usize,
    },
}

/// Result type for VolaDB operations.
pub type VectorStoreResult<T> = std::result::Result<T, VectorStoreError>;

impl VectorStoreError {
    /// Caller-input errors: always surfaced, never worth retrying.
    pub fn is_caller_input(&self) -> bool {
        matches!(
            self,
            VectorStoreError::FieldNotFound { .. }
                | VectorStoreError::AmbiguousVectorField { .. }
                | VectorStoreError::TypeMismatch { .. }
                | VectorStoreError::UnsupportedFilter { .. }
        )
    }

    /// State-precondition errors: the caller may retry after fixing state.
    pub fn is_state_precondition(&self) -> bool {
        matches!(
            self,
            VectorStoreError::CollectionNotFound { .. }
                | VectorStoreError::CollectionAlreadyExists { .. }
                | VectorStoreError::TypeConflict { .. }
        )
    }

    /// Check if this is a collection-not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, VectorStoreError::CollectionNotFound { .. })
    }
}
