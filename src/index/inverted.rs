use std::collections::BTreeMap;
use tracing::debug;
use crate::core::error::{Error, Result};
use crate::core::types::Position;
use crate::index::payload::{parse_short_id, IndexPayload};
use crate::index::posting::{FieldId, Posting, PostingList};
use crate::schema::schema::IndexSchema;
use crate::search::prefix::PrefixIndex;

/// In-memory inverted index rebuilt from a serialized payload
pub struct InvertedIndex {
    pub terms: Vec<String>,              // by ordinal
    pub postings: Vec<PostingList>,      // by ordinal
    pub prefix_index: PrefixIndex,
    pub field_lengths: Vec<Vec<u32>>,    // by position, then field
    pub avg_field_lengths: Vec<f64>,     // by field
    pub searchable_fields: Vec<FieldId>,
    pub doc_count: usize,
}

impl InvertedIndex {
    pub fn from_payload(payload: &IndexPayload, schema: &IndexSchema) -> Result<Self> {
        let doc_count = payload.document_count;
        let field_count = payload.average_field_length.len();

        let searchable_fields: Vec<FieldId> = schema
            .indexed_fields()
            .filter_map(|f| payload.field_ids.get(&f.name).copied().map(FieldId))
            .collect();

        let mut field_lengths = Vec::with_capacity(doc_count);
        for position in 0..doc_count {
            let lengths = payload.field_length.get(&position.to_string()).ok_or_else(|| {
                Error::schema(format!("document {} has no field lengths", position))
            })?;
            if lengths.len() < field_count {
                return Err(Error::schema(format!(
                    "document {} has {} field lengths, expected {}",
                    position,
                    lengths.len(),
                    field_count
                )));
            }
            field_lengths.push(lengths.clone());
        }

        // Merge repeated terms, then hand out ordinals in term order
        let mut merged: BTreeMap<&str, PostingList> = BTreeMap::new();
        let mut skipped = 0usize;
        for (term, by_field) in &payload.index {
            let list = merged.entry(term.as_str()).or_default();
            for (raw_field, freqs) in by_field {
                let field = FieldId(parse_short_id(raw_field)?);
                if field.0 as usize >= field_count {
                    return Err(Error::schema(format!("term '{}' refers to unknown field {}", term, field.0)));
                }
                for (raw_doc, term_freq) in freqs.by_document() {
                    let position = parse_short_id(raw_doc)?;
                    // Postings of discarded documents linger until the builder vacuums
                    if position as usize >= doc_count {
                        skipped += 1;
                        continue;
                    }
                    list.add_posting(field, Posting { position: Position(position), term_freq: *term_freq });
                }
            }
        }
        if skipped > 0 {
            debug!(skipped, "ignored postings of documents outside the corpus");
        }

        let mut terms = Vec::with_capacity(merged.len());
        let mut postings = Vec::with_capacity(merged.len());
        for (term, list) in merged.into_iter().filter(|(_, list)| !list.is_empty()) {
            terms.push(term.to_string());
            postings.push(list);
        }

        let mut prefix_index = PrefixIndex::new(1);
        prefix_index.build(terms.iter().enumerate().map(|(ordinal, term)| (term.as_str(), ordinal as u32)))?;

        Ok(InvertedIndex {
            terms,
            postings,
            prefix_index,
            field_lengths,
            avg_field_lengths: payload.average_field_length.clone(),
            searchable_fields,
            doc_count,
        })
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn posting_list(&self, ordinal: u32) -> Option<&PostingList> {
        self.postings.get(ordinal as usize)
    }

    /// Dictionary terms that `prefix` expands to, paired with their posting lists
    pub fn expand_prefix(&self, prefix: &str) -> Vec<(String, &PostingList)> {
        self.prefix_index
            .search_prefix(prefix)
            .into_iter()
            .filter_map(|(term, ordinal)| self.posting_list(ordinal).map(|list| (term, list)))
            .collect()
    }

    /// Exact dictionary lookup
    pub fn search_term(&self, term: &str) -> Option<&PostingList> {
        self.prefix_index.get(term).and_then(|ordinal| self.posting_list(ordinal))
    }

    pub fn field_length(&self, position: Position, field: FieldId) -> u32 {
        self.field_lengths
            .get(position.index())
            .and_then(|lengths| lengths.get(field.0 as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn avg_field_length(&self, field: FieldId) -> f64 {
        self.avg_field_lengths.get(field.0 as usize).copied().unwrap_or(0.0)
    }

    pub fn is_searchable(&self, field: FieldId) -> bool {
        self.searchable_fields.contains(&field)
    }
}
