//! Shared fixtures: a small bilingual cloud-service catalog.

#![allow(dead_code)]

use voladb::prelude::*;

pub const VECTOR_DIMS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct CloudService {
    pub key: i64,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub vector: Option<Vec<f32>>,
}

impl VectorStoreRecord for CloudService {
    type Key = i64;

    fn definition() -> RecordDefinition {
        RecordDefinition::builder()
            .key("Key")
            .field(FieldDefinition::data("Name").filterable(true))
            .field(FieldDefinition::data("Description").full_text_searchable(true))
            .field(FieldDefinition::data("Tags").filterable(true))
            .vector("Vector", VECTOR_DIMS, distance::COSINE_SIMILARITY)
            .build()
    }

    fn key(&self) -> i64 {
        self.key
    }

    fn vector(&self, name: &str) -> Option<&[f32]> {
        match name {
            "Vector" => self.vector.as_deref(),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "Key" => Some(self.key.into()),
            "Name" => Some(self.name.as_str().into()),
            "Description" => Some(self.description.as_str().into()),
            "Tags" => Some(FieldValue::Array(
                self.tags.iter().map(|t| t.as_str().into()).collect(),
            )),
            _ => None,
        }
    }
}

pub fn service(
    key: i64,
    name: &str,
    description: &str,
    tags: &[&str],
    vector: [f32; VECTOR_DIMS],
) -> CloudService {
    CloudService {
        key,
        name: name.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        vector: Some(vector.to_vec()),
    }
}

/// A catalog in the shape assistants index: bilingual names, short
/// descriptions, and hand-placed embeddings so test expectations stay exact.
pub fn catalog() -> Vec<CloudService> {
    vec![
        service(
            1,
            "Blob 存储",
            "Object storage for unstructured data / 非结构化数据的对象存储",
            &["storage", "blob"],
            [1.0, 0.0, 0.0, 0.0],
        ),
        service(
            2,
            "应用服务",
            "Managed web app hosting / 托管 Web 应用",
            &["compute", "web"],
            [0.0, 1.0, 0.0, 0.0],
        ),
        service(
            3,
            "密钥保管库",
            "Secrets and key management / 密钥与机密管理",
            &["security"],
            [0.0, 0.0, 1.0, 0.0],
        ),
        service(
            4,
            "文件存储",
            "Managed SMB file shares / 托管 SMB 文件共享",
            &["storage", "files"],
            [0.9, 0.1, 0.0, 0.0],
        ),
    ]
}

/// Store populated with [`catalog`] under the collection name
/// `cloudServices`.
pub fn populated_store() -> (VectorStore, VectorCollection<CloudService>) {
    let store = VectorStore::new();
    let services = store
        .get_collection::<CloudService>("cloudServices")
        .unwrap();
    services.create_collection().unwrap();
    services.upsert_batch(catalog()).unwrap();
    (store, services)
}
