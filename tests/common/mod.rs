#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use framefinder::analysis::analyzer::Analyzer;
use framefinder::core::types::StoredFields;
use framefinder::index::payload::{ExternalId, FieldFrequencies, IndexPayload};
use framefinder::{CorpusStore, Error, ErrorKind, Frame, FrameId, IndexFetcher, Position, Result};

/// One caption as the index builder sees it
#[derive(Debug, Clone)]
pub struct Caption {
    pub season: u32,
    pub episode: u32,
    pub id: u64,
    pub html: String,
}

pub fn caption(season: u32, episode: u32, id: u64, html: &str) -> Caption {
    Caption { season, episode, id, html: html.to_string() }
}

/// Builds payloads the way the offline index builder lays them out
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    captions: Vec<Caption>,
    string_ids: bool,
    still_paths: bool,
    wrapped_frequencies: bool,
}

impl PayloadBuilder {
    pub fn new(captions: Vec<Caption>) -> Self {
        PayloadBuilder { captions, string_ids: false, still_paths: false, wrapped_frequencies: false }
    }

    /// Early schema: string ids, a `stillPath` stored field, version 1 entries
    pub fn early_schema(mut self) -> Self {
        self.string_ids = true;
        self.still_paths = true;
        self.wrapped_frequencies = true;
        self
    }

    pub fn build(&self) -> IndexPayload {
        let analyzer = Analyzer::caption();
        let mut document_ids = HashMap::new();
        let mut field_length = HashMap::new();
        let mut stored_fields = HashMap::new();
        let mut terms: BTreeMap<String, HashMap<String, u32>> = BTreeMap::new();
        let mut total_length = 0u64;

        for (position, caption) in self.captions.iter().enumerate() {
            let short_id = position.to_string();
            let text = frame_of(position as u32, caption).text();
            let tokens = analyzer.terms(&text);
            total_length += tokens.len() as u64;

            for token in &tokens {
                *terms.entry(token.clone()).or_default().entry(short_id.clone()).or_default() += 1;
            }

            let id = if self.string_ids {
                ExternalId::Text(caption.id.to_string())
            } else {
                ExternalId::Number(caption.id)
            };
            document_ids.insert(short_id.clone(), id);
            field_length.insert(short_id.clone(), vec![tokens.len() as u32]);

            let fields = StoredFields {
                season: caption.season,
                episode: caption.episode,
                html: caption.html.clone(),
                still_path: self.still_paths.then(|| format!("stills/{}.png", caption.id)),
            };
            let serde_json::Value::Object(map) = serde_json::to_value(fields).unwrap() else {
                unreachable!("stored fields serialize to an object");
            };
            stored_fields.insert(short_id, map);
        }

        let index = terms
            .into_iter()
            .map(|(term, ds)| {
                let freqs = if self.wrapped_frequencies {
                    FieldFrequencies::Wrapped { ds }
                } else {
                    FieldFrequencies::Plain(ds)
                };
                (term, HashMap::from([("0".to_string(), freqs)]))
            })
            .collect();

        let count = self.captions.len();
        IndexPayload {
            document_count: count,
            next_id: count,
            document_ids,
            field_ids: HashMap::from([("text".to_string(), 0)]),
            field_length,
            average_field_length: vec![if count == 0 { 0.0 } else { total_length as f64 / count as f64 }],
            stored_fields,
            dirt_count: 0,
            index,
            serialization_version: if self.wrapped_frequencies { 1 } else { 2 },
        }
    }

    pub fn json(&self) -> String {
        serde_json::to_string(&self.build()).unwrap()
    }
}

fn frame_of(position: u32, caption: &Caption) -> Frame {
    Frame {
        position: Position(position),
        id: FrameId(caption.id),
        season: caption.season,
        episode: caption.episode,
        html: caption.html.clone(),
        still_path: None,
    }
}

pub fn loaded_store(captions: Vec<Caption>) -> CorpusStore {
    let mut store = CorpusStore::default();
    store.load_json(&PayloadBuilder::new(captions).json()).unwrap();
    store
}

/// `n` frames spread over seasons and episodes, ids increasing within each episode
pub fn synthetic_captions(n: usize) -> Vec<Caption> {
    const WORDS: [&str; 12] = [
        "horse", "hollywoo", "peanutbutter", "diane", "todd", "princess",
        "carolyn", "sitcom", "drink", "house", "party", "beatrice",
    ];
    (0..n)
        .map(|i| {
            let html = format!(
                "<i>{}</i> and {} at the {}",
                WORDS[i % WORDS.len()],
                WORDS[(i * 7 + 3) % WORDS.len()],
                WORDS[(i * 5 + 1) % WORDS.len()]
            );
            caption(1 + (i / 200) as u32, 1 + ((i / 20) % 10) as u32, 1_000 * (i % 20) as u64 + 500, &html)
        })
        .collect()
}

/// Hands out a fixed payload
pub struct StaticFetcher(pub String);

impl IndexFetcher for StaticFetcher {
    async fn fetch(&self, _source: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Fails the first `failures` fetches, then succeeds
pub struct FlakyFetcher {
    pub payload: String,
    pub failures: usize,
    pub calls: Arc<AtomicUsize>,
}

impl IndexFetcher for FlakyFetcher {
    async fn fetch(&self, source: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(Error::new(ErrorKind::Io, format!("{} unreachable", source)));
        }
        Ok(self.payload.clone())
    }
}

/// Holds the payload back until `gate.notify_one()` is called
pub struct GatedFetcher {
    pub payload: String,
    pub gate: Arc<Notify>,
}

impl IndexFetcher for GatedFetcher {
    async fn fetch(&self, _source: &str) -> Result<String> {
        self.gate.notified().await;
        Ok(self.payload.clone())
    }
}
