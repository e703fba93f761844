//! The filter clause language.
//!
//! A [`VectorSearchFilter`] is a conjunctive (AND) list of clauses evaluated
//! against every candidate record before vector comparison — a pure
//! predicate over the unfiltered record sequence, no index involved.

use serde::{Deserialize, Serialize};

use crate::error::{VectorStoreError, VectorStoreResult};
use crate::record::VectorStoreRecord;
use crate::value::FieldValue;

/// One predicate term in a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FilterClause {
    /// The field's value must equal the literal. Null equals null.
    EqualTo {
        /// Field to read from the record.
        field: String,
        /// Literal to compare against.
        value: FieldValue,
    },
    /// The field must be a sequence; passes when any element equals the
    /// literal. A null element matches a null literal.
    AnyTagEqualTo {
        /// Field to read from the record.
        field: String,
        /// Literal to compare each element against.
        value: FieldValue,
    },
}

impl FilterClause {
    /// Evaluate this clause against one record.
    pub fn matches<R: VectorStoreRecord>(&self, record: &R) -> VectorStoreResult<bool> {
        match self {
            FilterClause::EqualTo { field, value } => {
                let actual = lookup(record, field)?;
                Ok(actual == *value)
            }
            FilterClause::AnyTagEqualTo { field, value } => {
                let actual = lookup(record, field)?;
                let items = actual
                    .as_array()
                    .ok_or_else(|| VectorStoreError::TypeMismatch {
                        field: field.clone(),
                        expected: "Array",
                        actual: actual.type_name(),
                    })?;
                Ok(items.iter().any(|item| item == value))
            }
        }
    }
}

fn lookup<R: VectorStoreRecord>(record: &R, field: &str) -> VectorStoreResult<FieldValue> {
    record
        .field(field)
        .ok_or_else(|| VectorStoreError::FieldNotFound {
            field: field.to_string(),
        })
}

/// Conjunctive list of filter clauses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSearchFilter {
    clauses: Vec<FilterClause>,
}

impl VectorSearchFilter {
    /// An empty filter, which matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality clause.
    pub fn equal_to(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.clauses.push(FilterClause::EqualTo {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add an any-tag-equals clause.
    pub fn any_tag_equal_to(
        mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.clauses.push(FilterClause::AnyTagEqualTo {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// The clauses, in insertion order.
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Evaluate all clauses against one record, short-circuiting on the
    /// first clause that fails.
    pub fn matches<R: VectorStoreRecord>(&self, record: &R) -> VectorStoreResult<bool> {
        for clause in &self.clauses {
            if !clause.matches(record)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Parse the wire form: a JSON array of clause objects like
    /// `{"kind": "EqualTo", "field": "Name", "value": "docs"}`.
    ///
    /// Clause kinds are a closed enum in this crate, so an unknown `kind`
    /// can only arrive through this path; it is reported as
    /// [`VectorStoreError::UnsupportedFilter`].
    pub fn from_json(json: &str) -> VectorStoreResult<Self> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|e| VectorStoreError::UnsupportedFilter {
                kind: format!("malformed filter: {e}"),
            })?;
        let mut clauses = Vec::with_capacity(raw.len());
        for clause in raw {
            let kind = clause
                .get("kind")
                .and_then(|k| k.as_str())
                .unwrap_or("<missing>")
                .to_string();
            let parsed: FilterClause = serde_json::from_value(clause)
                .map_err(|_| VectorStoreError::UnsupportedFilter { kind })?;
            clauses.push(parsed);
        }
        Ok(Self { clauses })
    }
}
