use crate::core::types::Position;

/// Field identifier, as assigned by the index builder's `fieldIds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub position: Position,
    pub term_freq: u32,       // Term frequency in this field of the document
}

/// Postings of one term within one field.
/// Note: Sorted by position, so document frequency is just the length
#[derive(Debug, Clone)]
pub struct FieldPostings {
    pub field: FieldId,
    pub postings: Vec<Posting>,
}

impl FieldPostings {
    pub fn doc_freq(&self) -> usize {
        self.postings.len()
    }
}

/// Posting list for a term, split by field
#[derive(Debug, Clone, Default)]
pub struct PostingList {
    pub fields: Vec<FieldPostings>,  // Sorted by field id
}

impl PostingList {
    pub fn add_posting(&mut self, field: FieldId, posting: Posting) {
        let index = match self.fields.binary_search_by_key(&field, |f| f.field) {
            Ok(index) => index,
            Err(index) => {
                self.fields.insert(index, FieldPostings { field, postings: Vec::new() });
                index
            }
        };

        let postings = &mut self.fields[index].postings;
        match postings.binary_search_by_key(&posting.position, |p| p.position) {
            // Duplicate entries for one document: frequencies add up
            Ok(pos) => postings[pos].term_freq += posting.term_freq,
            Err(pos) => postings.insert(pos, posting),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|f| f.postings.is_empty())
    }
}
