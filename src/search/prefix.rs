use fst::{IntoStreamer, Map, MapBuilder, Streamer};
use crate::core::error::Result;

/// FST over the term dictionary for prefix expansion
pub struct PrefixIndex {
    /// Finite state transducer mapping each term to its dictionary ordinal
    fst: Map<Vec<u8>>,

    /// Minimum prefix length to prevent abuse
    min_prefix_len: usize,
}

impl PrefixIndex {
    pub fn new(min_prefix_len: usize) -> Self {
        Self {
            fst: Map::default(),
            min_prefix_len,
        }
    }

    /// Build FST from `(term, ordinal)` pairs. Terms must be unique.
    pub fn build<'a, I>(&mut self, terms: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut sorted_terms: Vec<(&str, u32)> = terms.into_iter().collect();

        // FST requires sorted input
        sorted_terms.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        let mut builder = MapBuilder::memory();
        for (term, ordinal) in sorted_terms {
            builder.insert(term.as_bytes(), u64::from(ordinal))?;
        }

        self.fst = builder.into_map();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fst.is_empty()
    }

    /// Ordinal of an exact term
    pub fn get(&self, term: &str) -> Option<u32> {
        self.fst.get(term.as_bytes()).and_then(|v| u32::try_from(v).ok())
    }

    /// All terms starting with `prefix`, the prefix itself included, in byte order
    pub fn search_prefix(&self, prefix: &str) -> Vec<(String, u32)> {
        if prefix.len() < self.min_prefix_len {
            return vec![];
        }

        let mut results = Vec::new();
        let prefix_bytes = prefix.as_bytes();

        // Use FST range query for efficient prefix search
        let mut stream = self.fst.range().ge(prefix_bytes).into_stream();

        while let Some((term_bytes, ordinal)) = stream.next() {
            if !term_bytes.starts_with(prefix_bytes) {
                break;
            }

            if let (Ok(term), Ok(ordinal)) = (std::str::from_utf8(term_bytes), u32::try_from(ordinal)) {
                results.push((term.to_string(), ordinal));
            }
        }

        results
    }
}
