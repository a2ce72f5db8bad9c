use crate::core::config::Bm25Params;

/// Scorer trait
pub trait Scorer: Send + Sync {
    fn score(&self, term_freq: u32, doc_freq: usize, doc_stats: &DocStats) -> f64;
}

/// Document statistics for scoring
#[derive(Debug, Clone)]
pub struct DocStats {
    pub field_length: u32,    // Number of tokens in the field
    pub avg_field_length: f64,// Average field length in collection
    pub total_docs: usize,    // Total number of documents
}

/// BM25+ Scorer, with the lower-bound `d` term the index builder's search
/// library adds so long captions are not pushed to zero
pub struct Bm25PlusScorer {
    pub params: Bm25Params,
}

impl Default for Bm25PlusScorer {
    fn default() -> Self {
        Bm25PlusScorer {
            params: Bm25Params::default(),
        }
    }
}

impl Bm25PlusScorer {
    pub fn new(params: Bm25Params) -> Self {
        Bm25PlusScorer { params }
    }
}

impl Scorer for Bm25PlusScorer {
    fn score(&self, term_freq: u32, doc_freq: usize, doc_stats: &DocStats) -> f64 {
        let Bm25Params { k, b, d } = self.params;
        let tf = f64::from(term_freq);
        let df = doc_freq as f64;
        let n = doc_stats.total_docs as f64;

        let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();
        let length_ratio = if doc_stats.avg_field_length > 0.0 {
            f64::from(doc_stats.field_length) / doc_stats.avg_field_length
        } else {
            1.0
        };

        idf * (d + tf * (k + 1.0) / (tf + k * (1.0 - b + b * length_ratio)))
    }
}
