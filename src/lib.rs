pub mod core;
pub mod analysis;
pub mod schema;
pub mod index;
pub mod scoring;
pub mod search;
pub mod query;
pub mod navigation;
pub mod worker;

pub use crate::core::config::Config;
pub use crate::core::corpus::{Corpus, CorpusStore};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::fetch::{FileFetcher, IndexFetcher};
#[cfg(feature = "http")]
pub use crate::core::fetch::HttpFetcher;
pub use crate::core::types::{AssetKind, Frame, FrameId, FrameKey, Position};
pub use crate::navigation::resolver::NavigationResolver;
pub use crate::search::executor::QueryEngine;
pub use crate::search::results::SearchOutcome;
pub use crate::worker::{Notification, Worker, WorkerHandle};

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                        FRAMEFINDER STRUCT ARCHITECTURE                       │
└──────────────────────────────────────────────────────────────────────────────┘

   host (UI)                                    worker task (tokio::spawn)
 ┌──────────────────┐   Command (mpsc)    ┌────────────────────────────────────┐
 │ WorkerHandle     │ ──────────────────► │ struct Worker<F: IndexFetcher>     │
 │ • init()         │                     │ • store: CorpusStore               │
 │ • search(q)      │   Notification      │ • engine: QueryEngine              │
 │ • random_frame() │ ◄────────────────── │ • navigator: NavigationResolver    │
 │ • frame_at(k, d) │   (ordered mpsc)    │ • criteria: String                 │
 └──────────────────┘  oneshot replies    └────────────────────────────────────┘

┌─────────────────────────────── CORPUS LAYER ─────────────────────────────────┐
│  struct CorpusStore { schema: IndexSchema, corpus: Option<Corpus> }          │
│  struct Corpus                                                               │
│   • index: InvertedIndex                 // rebuilt from IndexPayload        │
│   • position_to_id: Vec<FrameId>                                             │
│   • position_to_fields: Vec<StoredFields>                                    │
│   • frame_key_to_position: HashMap<FrameKey, Position>                       │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── INDEX LAYER ──────────────────────────────────┐
│  struct InvertedIndex                                                        │
│   • terms / postings: by ordinal         // PostingList → FieldPostings      │
│   • prefix_index: PrefixIndex            // fst::Map term → ordinal          │
│   • field_lengths, avg_field_lengths     // BM25+ length normalization       │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── SEARCH LAYER ─────────────────────────────────┐
│  QueryParser (criteria Analyzer + caption Analyzer) → Query::All(TermQuery)  │
│  QueryEngine: expand prefixes → Bm25PlusScorer → AND → rank → dedup → top 40 │
│  QueryCache: lru::LruCache<String, SearchOutcome>                            │
└──────────────────────────────────────────────────────────────────────────────┘
*/
