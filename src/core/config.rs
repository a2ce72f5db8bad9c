use serde::{Deserialize, Serialize};
use crate::core::error::Result;

/// BM25+ parameters. Must match the search library used by the index builder
/// or scores drift from what the offline tool expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    pub k: f64,
    pub b: f64,
    pub d: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params {
            k: 1.2,
            b: 0.7,
            d: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the worker fetches the serialized index from on `init`
    pub index_source: String,

    // Criteria filtering and result shaping
    pub min_term_len: usize,                    // shorter criteria tokens are dropped
    pub max_results: usize,                     // results kept after dedup
    pub cache_size: usize,                      // LRU entries, 0 disables caching

    // Scoring
    pub prefix_weight: f64,
    pub bm25: Bm25Params,

    /// Fixed seed for random navigation, entropy-seeded when unset
    pub random_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            index_source: "data/index.json".to_string(),

            min_term_len: 3,
            max_results: 40,
            cache_size: 256,

            prefix_weight: 0.375,
            bm25: Bm25Params::default(),

            random_seed: None,
        }
    }
}

impl Config {
    /// Parse a host-provided JSON config. Missing keys fall back to defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_index_source(mut self, source: impl Into<String>) -> Self {
        self.index_source = source.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}
