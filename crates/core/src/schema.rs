//! Record schema declaration.
//!
//! A [`RecordDefinition`] is the explicit, static description of a record
//! type's fields: which one is the key, which carry data, and which carry
//! embedding vectors. It is declared once — either handed to
//! `VectorStore::get_collection` or returned from
//! [`VectorStoreRecord::definition`](crate::record::VectorStoreRecord::definition) —
//! and resolved into accessors at collection creation. There is no runtime
//! introspection.

use serde::{Deserialize, Serialize};

/// Role of a field inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRole {
    /// The record's unique key. Exactly one per record type.
    Key,
    /// Plain payload field, optionally filterable.
    Data,
    /// Fixed-length `f32` embedding with an associated distance function.
    Vector,
}

/// Declaration of one record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Logical field name, as used by accessors and filters.
    pub name: String,
    /// Role of the field.
    pub role: FieldRole,
    /// Name under which the field is stored, when it differs from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_name: Option<String>,
    /// Name the field serializes under, when it differs from `name`.
    /// Takes precedence over a collection-level naming policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized_name: Option<String>,
    /// Embedding dimension. Vector fields only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,
    /// Distance function tag (see [`crate::distance::functions`]).
    /// Vector fields only; `None` means cosine similarity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_function: Option<String>,
    /// Whether the field may appear in filter clauses.
    #[serde(default)]
    pub filterable: bool,
    /// Whether the field is full-text searchable.
    #[serde(default)]
    pub full_text_searchable: bool,
}

impl FieldDefinition {
    fn new(name: impl Into<String>, role: FieldRole) -> Self {
        Self {
            name: name.into(),
            role,
            storage_name: None,
            serialized_name: None,
            dimensions: None,
            distance_function: None,
            filterable: false,
            full_text_searchable: false,
        }
    }

    /// Declare a key field.
    pub fn key(name: impl Into<String>) -> Self {
        Self::new(name, FieldRole::Key)
    }

    /// Declare a data field.
    pub fn data(name: impl Into<String>) -> Self {
        Self::new(name, FieldRole::Data)
    }

    /// Declare a vector field with its dimension and distance function tag.
    pub fn vector(
        name: impl Into<String>,
        dimensions: usize,
        distance_function: impl Into<String>,
    ) -> Self {
        let mut field = Self::new(name, FieldRole::Vector);
        field.dimensions = Some(dimensions);
        field.distance_function = Some(distance_function.into());
        field
    }

    /// Declare a vector field that uses the default distance function
    /// (cosine similarity).
    pub fn vector_default(name: impl Into<String>, dimensions: usize) -> Self {
        let mut field = Self::new(name, FieldRole::Vector);
        field.dimensions = Some(dimensions);
        field
    }

    /// Override the storage name.
    pub fn with_storage_name(mut self, storage_name: impl Into<String>) -> Self {
        self.storage_name = Some(storage_name.into());
        self
    }

    /// Override the serialized name.
    pub fn with_serialized_name(mut self, serialized_name: impl Into<String>) -> Self {
        self.serialized_name = Some(serialized_name.into());
        self
    }

    /// Mark the field filterable.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Mark the field full-text searchable.
    pub fn full_text_searchable(mut self, full_text_searchable: bool) -> Self {
        self.full_text_searchable = full_text_searchable;
        self
    }
}

/// Ordered schema of a record type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDefinition {
    /// The fields, in declaration order.
    pub fields: Vec<FieldDefinition>,
}

impl RecordDefinition {
    /// Start building a definition.
    pub fn builder() -> RecordDefinitionBuilder {
        RecordDefinitionBuilder::default()
    }

    /// Fields with the given role, in declaration order.
    pub fn fields_with_role(&self, role: FieldRole) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(move |f| f.role == role)
    }

    /// Look up a field by logical name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builder for [`RecordDefinition`].
#[derive(Debug, Default)]
pub struct RecordDefinitionBuilder {
    fields: Vec<FieldDefinition>,
}

impl RecordDefinitionBuilder {
    /// Add a key field.
    pub fn key(self, name: impl Into<String>) -> Self {
        self.field(FieldDefinition::key(name))
    }

    /// Add a data field.
    pub fn data(self, name: impl Into<String>) -> Self {
        self.field(FieldDefinition::data(name))
    }

    /// Add a vector field.
    pub fn vector(
        self,
        name: impl Into<String>,
        dimensions: usize,
        distance_function: impl Into<String>,
    ) -> Self {
        self.field(FieldDefinition::vector(name, dimensions, distance_function))
    }

    /// Add a fully configured field.
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Finish the definition. Multiplicity validation happens when the
    /// definition is resolved against a record type, not here.
    pub fn build(self) -> RecordDefinition {
        RecordDefinition {
            fields: self.fields,
        }
    }
}

/// Naming transform applied to serialized names that have no explicit
/// override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamingPolicy {
    /// `FieldName` -> `field_name`
    SnakeCase,
    /// `FieldName` -> `fieldName`
    LowerCamelCase,
}

impl NamingPolicy {
    /// Apply the transform to a logical field name.
    pub fn apply(&self, name: &str) -> String {
        match self {
            NamingPolicy::SnakeCase => to_snake_case(name),
            NamingPolicy::LowerCamelCase => to_lower_camel_case(name),
        }
    }
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

fn to_lower_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
