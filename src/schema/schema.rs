use serde::{Serialize, Deserialize};
use crate::core::error::{Error, Result};
use crate::index::payload::IndexPayload;

/// Field definition in the serialized index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub indexed: bool,
    pub stored: bool,
    pub required: bool,   // stored fields only: absent in early or later payloads
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineWith {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchDefaults {
    pub combine_with: CombineWith,
    pub prefix: bool,
}

/// The layout the offline index builder writes. Nothing in the payload
/// describes it, so both sides hardcode it and `validate` is the only check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSchema {
    pub fields: Vec<FieldDefinition>,
    pub search: SearchDefaults,
    pub serialization_versions: Vec<u32>,
}

impl IndexSchema {
    pub fn captions() -> Self {
        IndexSchema {
            fields: vec![
                FieldDefinition { name: "text".to_string(), indexed: true, stored: false, required: true },
                FieldDefinition { name: "html".to_string(), indexed: false, stored: true, required: true },
                FieldDefinition { name: "season".to_string(), indexed: false, stored: true, required: true },
                FieldDefinition { name: "episode".to_string(), indexed: false, stored: true, required: true },
                FieldDefinition { name: "stillPath".to_string(), indexed: false, stored: true, required: false },
            ],
            search: SearchDefaults {
                combine_with: CombineWith::And,
                prefix: true,
            },
            serialization_versions: vec![1, 2],
        }
    }

    pub fn indexed_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.indexed)
    }

    pub fn required_stored_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.stored && f.required)
    }

    /// Reject payloads whose layout disagrees with this schema.
    pub fn validate(&self, payload: &IndexPayload) -> Result<()> {
        if !self.serialization_versions.contains(&payload.serialization_version) {
            return Err(Error::schema(format!(
                "unsupported serialization version {}",
                payload.serialization_version
            )));
        }

        for field in self.indexed_fields() {
            let Some(&field_id) = payload.field_ids.get(&field.name) else {
                return Err(Error::schema(format!("indexed field '{}' missing from payload", field.name)));
            };
            if field_id as usize >= payload.average_field_length.len() {
                return Err(Error::schema(format!(
                    "indexed field '{}' has id {} but only {} field lengths",
                    field.name,
                    field_id,
                    payload.average_field_length.len()
                )));
            }
        }

        if payload.document_ids.len() != payload.document_count {
            return Err(Error::schema(format!(
                "documentCount is {} but {} document ids are present",
                payload.document_count,
                payload.document_ids.len()
            )));
        }

        for (short_id, stored) in &payload.stored_fields {
            for field in self.required_stored_fields() {
                if stored.get(&field.name).is_none() {
                    return Err(Error::schema(format!(
                        "document {} lacks stored field '{}'",
                        short_id, field.name
                    )));
                }
            }
        }

        Ok(())
    }
}
