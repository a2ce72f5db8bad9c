use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{FrameId, StoredFields};

/// Serialized index as written by the offline index builder.
///
/// Short document ids (the string keys below) are the corpus positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexPayload {
    pub document_count: usize,
    #[serde(default)]
    pub next_id: usize,
    pub document_ids: HashMap<String, ExternalId>,
    pub field_ids: HashMap<String, u32>,
    pub field_length: HashMap<String, Vec<u32>>,
    pub average_field_length: Vec<f64>,
    pub stored_fields: HashMap<String, Map<String, Value>>,
    #[serde(default)]
    pub dirt_count: usize,
    pub index: Vec<(String, HashMap<String, FieldFrequencies>)>,
    #[serde(default = "default_serialization_version")]
    pub serialization_version: u32,
}

fn default_serialization_version() -> u32 {
    1
}

/// External frame id. Numbers in later payloads, numeric strings in early ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Number(u64),
    Text(String),
}

impl ExternalId {
    pub fn frame_id(&self) -> Result<FrameId> {
        match self {
            ExternalId::Number(n) => Ok(FrameId(*n)),
            ExternalId::Text(s) => s.trim().parse().map(FrameId).map_err(|_| {
                Error::schema(format!("document id '{}' is not a timestamp", s))
            }),
        }
    }
}

/// Term frequencies of one term in one field, keyed by short document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldFrequencies {
    /// serialization version 1
    Wrapped { ds: HashMap<String, u32> },
    Plain(HashMap<String, u32>),
}

impl FieldFrequencies {
    pub fn by_document(&self) -> &HashMap<String, u32> {
        match self {
            FieldFrequencies::Wrapped { ds } => ds,
            FieldFrequencies::Plain(freqs) => freqs,
        }
    }
}

impl IndexPayload {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| {
            Error::new(ErrorKind::Parse, format!("index payload: {}", e))
        })
    }

    pub fn stored_fields_at(&self, short_id: &str) -> Result<StoredFields> {
        let raw = self.stored_fields.get(short_id).ok_or_else(|| {
            Error::schema(format!("document {} has no stored fields", short_id))
        })?;
        serde_json::from_value(Value::Object(raw.clone())).map_err(|e| {
            Error::schema(format!("stored fields of document {}: {}", short_id, e))
        })
    }
}

/// Parse a short document id into a position-sized integer.
pub fn parse_short_id(raw: &str) -> Result<u32> {
    raw.parse().map_err(|_| Error::schema(format!("short document id '{}' is not an integer", raw)))
}
