//! Schema resolution and caching.
//!
//! A [`SchemaReader`] is built once per collection handle: it takes either an
//! explicit [`RecordDefinition`] (used verbatim) or the record type's own
//! declaration, validates field multiplicity, and serves the derived name
//! maps and the search-target vector field. The derived maps are built
//! lazily and cached; repeated calls return identical results.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use vola_core::error::{VectorStoreError, VectorStoreResult};
use vola_core::record::VectorStoreRecord;
use vola_core::schema::{FieldDefinition, FieldRole, NamingPolicy, RecordDefinition};

/// Multiplicity rules and naming configuration for schema resolution.
#[derive(Debug, Clone)]
pub struct SchemaReaderOptions {
    /// Allow more than one key field. Off in this profile.
    pub supports_multiple_keys: bool,
    /// Allow more than one vector field. On by default.
    pub supports_multiple_vectors: bool,
    /// Require at least one vector field. Off by default; a collection that
    /// never searches does not need vectors.
    pub requires_at_least_one_vector: bool,
    /// Transform applied to serialized names without an explicit override.
    pub naming_policy: Option<NamingPolicy>,
}

impl Default for SchemaReaderOptions {
    fn default() -> Self {
        Self {
            supports_multiple_keys: false,
            supports_multiple_vectors: true,
            requires_at_least_one_vector: false,
            naming_policy: None,
        }
    }
}

/// Validated schema of one record type, with cached derived name maps.
#[derive(Debug)]
pub struct SchemaReader {
    type_name: &'static str,
    definition: RecordDefinition,
    key_fields: Vec<FieldDefinition>,
    data_fields: Vec<FieldDefinition>,
    vector_fields: Vec<FieldDefinition>,
    naming_policy: Option<NamingPolicy>,
    storage_names: OnceCell<HashMap<String, String>>,
    serialized_names: OnceCell<HashMap<String, String>>,
}

impl SchemaReader {
    /// Resolve a schema for `R`: the explicit definition when given,
    /// otherwise `R::definition()`.
    pub fn resolve<R: VectorStoreRecord>(
        explicit: Option<RecordDefinition>,
        options: SchemaReaderOptions,
    ) -> VectorStoreResult<Self> {
        let definition = explicit.unwrap_or_else(R::definition);
        Self::from_definition(R::type_name(), definition, options)
    }

    /// Validate a definition against the multiplicity rules.
    pub fn from_definition(
        type_name: &'static str,
        definition: RecordDefinition,
        options: SchemaReaderOptions,
    ) -> VectorStoreResult<Self> {
        let key_fields: Vec<_> = definition
            .fields_with_role(FieldRole::Key)
            .cloned()
            .collect();
        let data_fields: Vec<_> = definition
            .fields_with_role(FieldRole::Data)
            .cloned()
            .collect();
        let vector_fields: Vec<_> = definition
            .fields_with_role(FieldRole::Vector)
            .cloned()
            .collect();

        let schema_error = |reason: &str| VectorStoreError::Schema {
            type_name: type_name.to_string(),
            reason: reason.to_string(),
        };

        if key_fields.is_empty() {
            return Err(schema_error("no key field found"));
        }
        if key_fields.len() > 1 && !options.supports_multiple_keys {
            return Err(schema_error("multiple key fields found"));
        }
        if options.requires_at_least_one_vector && vector_fields.is_empty() {
            return Err(schema_error(
                "no vector field found while at least one is required",
            ));
        }
        if vector_fields.len() > 1 && !options.supports_multiple_vectors {
            return Err(schema_error(
                "multiple vector fields found while only one is supported",
            ));
        }

        Ok(Self {
            type_name,
            definition,
            key_fields,
            data_fields,
            vector_fields,
            naming_policy: options.naming_policy,
            storage_names: OnceCell::new(),
            serialized_names: OnceCell::new(),
        })
    }

    /// Record type this schema was resolved for.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The full definition, in declaration order.
    pub fn definition(&self) -> &RecordDefinition {
        &self.definition
    }

    /// The key field.
    pub fn key_field(&self) -> &FieldDefinition {
        &self.key_fields[0]
    }

    /// The data fields, in declaration order.
    pub fn data_fields(&self) -> &[FieldDefinition] {
        &self.data_fields
    }

    /// The vector fields, in declaration order.
    pub fn vector_fields(&self) -> &[FieldDefinition] {
        &self.vector_fields
    }

    /// Map from logical field name to storage name. Defaults to the field
    /// name unless overridden. Built on first use, cached after.
    pub fn storage_names(&self) -> &HashMap<String, String> {
        self.storage_names.get_or_init(|| {
            self.definition
                .fields
                .iter()
                .map(|f| {
                    let storage = f.storage_name.clone().unwrap_or_else(|| f.name.clone());
                    (f.name.clone(), storage)
                })
                .collect()
        })
    }

    /// Map from logical field name to serialized name. An explicit override
    /// wins; otherwise the naming policy applies; otherwise the field name.
    pub fn serialized_names(&self) -> &HashMap<String, String> {
        self.serialized_names.get_or_init(|| {
            self.definition
                .fields
                .iter()
                .map(|f| {
                    let serialized = match (&f.serialized_name, self.naming_policy) {
                        (Some(explicit), _) => explicit.clone(),
                        (None, Some(policy)) => policy.apply(&f.name),
                        (None, None) => f.name.clone(),
                    };
                    (f.name.clone(), serialized)
                })
                .collect()
        })
    }

    /// Storage name of one field.
    pub fn storage_name(&self, field: &str) -> VectorStoreResult<&str> {
        self.storage_names()
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| VectorStoreError::FieldNotFound {
                field: field.to_string(),
            })
    }

    /// Serialized name of one field.
    pub fn serialized_name(&self, field: &str) -> VectorStoreResult<&str> {
        self.serialized_names()
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| VectorStoreError::FieldNotFound {
                field: field.to_string(),
            })
    }

    /// Resolve the vector field a search should target.
    ///
    /// A requested name must match exactly; with no name, the single vector
    /// field is used, and more than one is ambiguous.
    pub fn select_vector_field(
        &self,
        requested: Option<&str>,
    ) -> VectorStoreResult<&FieldDefinition> {
        if let Some(name) = requested.filter(|n| !n.trim().is_empty()) {
            return self
                .vector_fields
                .iter()
                .find(|f| f.name == name)
                .ok_or_else(|| VectorStoreError::FieldNotFound {
                    field: name.to_string(),
                });
        }
        match self.vector_fields.len() {
            0 => Err(VectorStoreError::Schema {
                type_name: self.type_name.to_string(),
                reason: "no vector fields found".to_string(),
            }),
            1 => Ok(&self.vector_fields[0]),
            _ => Err(VectorStoreError::AmbiguousVectorField {
                type_name: self.type_name.to_string(),
            }),
        }
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
        vector: Vec<f32>,
    }

    impl VectorStoreRecord for Doc {
        type Key = i64;

        fn definition() -> RecordDefinition {
            RecordDefinition::builder()
                .key("Id")
                .data("Title")
                .vector("Vector", 4, functions::COSINE_SIMILARITY)
                .build()
        }

        fn key(&self) -> i64 {
            self.id
        }

        fn vector(&self, name: &str) -> Option<&[f32]> {
            (name == "Vector").then_some(self.vector.as_slice())
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            (name == "Id").then(|| self.id.into())
        }
    }

    fn two_vector_definition() -> RecordDefinition {
        RecordDefinition::builder()
            .key("Id")
            .vector("Title", 4, functions::COSINE_SIMILARITY)
            .vector("Body", 4, functions::COSINE_SIMILARITY)
            .build()
    }

    #[test]
    fn derived_equals_explicit() {
        let derived =
            SchemaReader::resolve::<Doc>(None, SchemaReaderOptions::default()).unwrap();
        let explicit =
            SchemaReader::resolve::<Doc>(Some(Doc::definition()), SchemaReaderOptions::default())
                .unwrap();
        assert_eq!(derived.definition(), explicit.definition());
        assert_eq!(derived.key_field(), explicit.key_field());
        assert_eq!(derived.vector_fields(), explicit.vector_fields());
    }

    #[test]
    fn missing_key_is_schema_error() {
        let definition = RecordDefinition::builder().data("Title").build();
        let err =
            SchemaReader::from_definition("Doc", definition, SchemaReaderOptions::default())
                .unwrap_err();
        assert!(matches!(err, VectorStoreError::Schema { .. }));
    }

    #[test]
    fn multiple_keys_rejected_by_default() {
        let definition = RecordDefinition::builder().key("A").key("B").build();
        let err =
            SchemaReader::from_definition("Doc", definition.clone(), SchemaReaderOptions::default())
                .unwrap_err();
        assert!(matches!(err, VectorStoreError::Schema { .. }));

        // Explicitly enabled, the same definition passes.
        let options = SchemaReaderOptions {
            supports_multiple_keys: true,
            ..Default::default()
        };
        assert!(SchemaReader::from_definition("Doc", definition, options).is_ok());
    }

    #[test]
    fn vector_multiplicity_rules() {
        let no_vectors = RecordDefinition::builder().key("Id").build();
        let options = SchemaReaderOptions {
            requires_at_least_one_vector: true,
            ..Default::default()
        };
        assert!(matches!(
            SchemaReader::from_definition("Doc", no_vectors, options).unwrap_err(),
            VectorStoreError::Schema { .. }
        ));

        let options = SchemaReaderOptions {
            supports_multiple_vectors: false,
            ..Default::default()
        };
        assert!(matches!(
            SchemaReader::from_definition("Doc", two_vector_definition(), options).unwrap_err(),
            VectorStoreError::Schema { .. }
        ));
    }

    #[test]
    fn storage_names_default_and_override() {
        let definition = RecordDefinition::builder()
            .key("Id")
            .field(FieldDefinition::data("Name").with_storage_name("name_col"))
            .build();
        let reader =
            SchemaReader::from_definition("Doc", definition, SchemaReaderOptions::default())
                .unwrap();
        assert_eq!(reader.storage_name("Id").unwrap(), "Id");
        assert_eq!(reader.storage_name("Name").unwrap(), "name_col");
        assert!(matches!(
            reader.storage_name("Missing").unwrap_err(),
            VectorStoreError::FieldNotFound { .. }
        ));
    }

    #[test]
    fn serialized_names_honor_override_then_policy() {
        let definition = RecordDefinition::builder()
            .key("DocId")
            .field(FieldDefinition::data("DisplayName").with_serialized_name("label"))
            .data("CreatedAt")
            .build();
        let options = SchemaReaderOptions {
            naming_policy: Some(NamingPolicy::SnakeCase),
            ..Default::default()
        };
        let reader = SchemaReader::from_definition("Doc", definition, options).unwrap();
        assert_eq!(reader.serialized_name("DocId").unwrap(), "doc_id");
        assert_eq!(reader.serialized_name("DisplayName").unwrap(), "label");
        assert_eq!(reader.serialized_name("CreatedAt").unwrap(), "created_at");
    }

    #[test]
    fn name_maps_are_cached_and_idempotent() {
        let reader =
            SchemaReader::resolve::<Doc>(None, SchemaReaderOptions::default()).unwrap();
        let first = reader.storage_names() as *const _;
        let second = reader.storage_names() as *const _;
        assert_eq!(first, second);
        assert_eq!(reader.serialized_names(), reader.serialized_names());
    }

    #[test]
    fn vector_field_selection() {
        let reader =
            SchemaReader::resolve::<Doc>(None, SchemaReaderOptions::default()).unwrap();
        assert_eq!(reader.select_vector_field(None).unwrap().name, "Vector");
        assert_eq!(
            reader.select_vector_field(Some("Vector")).unwrap().name,
            "Vector"
        );
        assert!(matches!(
            reader.select_vector_field(Some("Nope")).unwrap_err(),
            VectorStoreError::FieldNotFound { .. }
        ));

        let reader = SchemaReader::from_definition(
            "Doc",
            two_vector_definition(),
            SchemaReaderOptions::default(),
        )
        .unwrap();
        assert!(matches!(
            reader.select_vector_field(None).unwrap_err(),
            VectorStoreError::AmbiguousVectorField { .. }
        ));
        assert_eq!(reader.select_vector_field(Some("Body")).unwrap().name, "Body");

        let reader = SchemaReader::from_definition(
            "Doc",
            RecordDefinition::builder().key("Id").build(),
            SchemaReaderOptions::default(),
        )
        .unwrap();
        assert!(matches!(
            reader.select_vector_field(None).unwrap_err(),
            VectorStoreError::Schema { .. }
        ));
    }
}
