use std::collections::HashMap;
use rand::Rng;
use tracing::{info, instrument, warn};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::fetch::IndexFetcher;
use crate::core::types::{Frame, FrameId, FrameKey, Position, StoredFields};
use crate::index::inverted::InvertedIndex;
use crate::index::payload::IndexPayload;
use crate::schema::schema::IndexSchema;

/// The loaded corpus: full-text index plus the positional lookup tables.
/// Built once, never mutated.
pub struct Corpus {
    index: InvertedIndex,
    position_to_id: Vec<FrameId>,
    position_to_fields: Vec<StoredFields>,
    frame_key_to_position: HashMap<FrameKey, Position>,
}

impl Corpus {
    pub fn from_json(raw: &str, schema: &IndexSchema) -> Result<Self> {
        let payload = IndexPayload::from_json(raw)?;
        Self::from_payload(&payload, schema)
    }

    pub fn from_payload(payload: &IndexPayload, schema: &IndexSchema) -> Result<Self> {
        schema.validate(payload)?;

        let doc_count = payload.document_count;
        if u32::try_from(doc_count).is_err() {
            return Err(Error::schema(format!("{} documents exceed the position range", doc_count)));
        }

        let mut position_to_id = Vec::with_capacity(doc_count);
        let mut position_to_fields = Vec::with_capacity(doc_count);
        let mut frame_key_to_position = HashMap::with_capacity(doc_count);

        for index in 0..doc_count {
            let short_id = index.to_string();
            let id = payload
                .document_ids
                .get(&short_id)
                .ok_or_else(|| Error::schema(format!("positions are not contiguous: {} is missing", index)))?
                .frame_id()?;
            let fields = payload.stored_fields_at(&short_id)?;
            let position = Position(index as u32);

            let key = FrameKey { season: fields.season, episode: fields.episode, id };
            if let Some(previous) = frame_key_to_position.insert(key, position) {
                return Err(Error::schema(format!(
                    "frame {} appears at positions {} and {}",
                    key, previous.0, position.0
                )));
            }

            position_to_id.push(id);
            position_to_fields.push(fields);
        }

        let index = InvertedIndex::from_payload(payload, schema)?;

        Ok(Corpus {
            index,
            position_to_id,
            position_to_fields,
            frame_key_to_position,
        })
    }

    pub fn len(&self) -> usize {
        self.position_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position_to_id.is_empty()
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn frame_at(&self, position: Position) -> Option<Frame> {
        let id = *self.position_to_id.get(position.index())?;
        let fields = self.position_to_fields.get(position.index())?;
        Some(Frame {
            position,
            id,
            season: fields.season,
            episode: fields.episode,
            html: fields.html.clone(),
            still_path: fields.still_path.clone(),
        })
    }

    pub fn frame_key_at(&self, position: Position) -> Option<FrameKey> {
        let id = *self.position_to_id.get(position.index())?;
        let fields = self.position_to_fields.get(position.index())?;
        Some(FrameKey { season: fields.season, episode: fields.episode, id })
    }

    pub fn position_of(&self, key: &FrameKey) -> Option<Position> {
        self.frame_key_to_position.get(key).copied()
    }
}

/// First half of a load: pull the raw payload from `source`.
pub async fn fetch_payload<F: IndexFetcher>(fetcher: &F, source: &str) -> Result<String> {
    fetcher
        .fetch(source)
        .await
        .inspect_err(|e| warn!(%source, error = %e, "index fetch failed"))
}

/// Owner of the corpus. Not ready until a load succeeds; ready forever after.
pub struct CorpusStore {
    schema: IndexSchema,
    corpus: Option<Corpus>,
}

impl Default for CorpusStore {
    fn default() -> Self {
        CorpusStore::new(IndexSchema::captions())
    }
}

impl CorpusStore {
    pub fn new(schema: IndexSchema) -> Self {
        CorpusStore { schema, corpus: None }
    }

    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Fetch, parse and install the index in one call, for callers that own
    /// the store directly instead of going through the worker. On error the
    /// store stays not ready and a later call may retry.
    #[instrument(skip(self, fetcher))]
    pub async fn load<F: IndexFetcher>(&mut self, fetcher: &F, source: &str) -> Result<()> {
        if self.is_ready() {
            return Err(Error::new(ErrorKind::InvalidState, "corpus already loaded"));
        }
        let raw = fetch_payload(fetcher, source).await?;
        self.load_json(&raw)
    }

    /// Parse and install an already fetched payload. The worker fetches with
    /// [`fetch_payload`] without holding the store, then finishes here.
    pub fn load_json(&mut self, raw: &str) -> Result<()> {
        if self.is_ready() {
            return Err(Error::new(ErrorKind::InvalidState, "corpus already loaded"));
        }
        let corpus = Corpus::from_json(raw, &self.schema).inspect_err(|e| warn!(error = %e, "index rejected"))?;
        info!(frames = corpus.len(), terms = corpus.index().term_count(), "index loaded");
        self.corpus = Some(corpus);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.corpus.is_some()
    }

    pub fn corpus(&self) -> Option<&Corpus> {
        self.corpus.as_ref()
    }

    /// Number of frames, zero before loading
    pub fn size(&self) -> usize {
        self.corpus.as_ref().map_or(0, Corpus::len)
    }

    pub fn frame_at(&self, position: Position) -> Option<Frame> {
        self.corpus.as_ref()?.frame_at(position)
    }

    pub fn position_of(&self, season: u32, episode: u32, id: u64) -> Option<Position> {
        self.corpus.as_ref()?.position_of(&FrameKey::new(season, episode, id))
    }

    /// Uniform pick over `[0, N)`. `None` when not ready or empty.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let size = self.size();
        if size == 0 {
            return None;
        }
        Some(Position(rng.gen_range(0..size) as u32))
    }
}
