use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use crate::core::corpus::CorpusStore;
use crate::core::types::{Frame, FrameKey};

/// Positional navigation over the corpus order.
///
/// Next and previous are plain position arithmetic: the order baked into the
/// index at build time is trusted, nothing is re-sorted here. Moving past
/// either end fails instead of wrapping.
pub struct NavigationResolver {
    rng: StdRng,
}

impl Default for NavigationResolver {
    fn default() -> Self {
        NavigationResolver::new(None)
    }
}

impl NavigationResolver {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        NavigationResolver { rng }
    }

    /// Frame `delta` positions away from `key`. `None` when the key is
    /// unknown or the target falls outside the corpus.
    pub fn resolve(&self, store: &CorpusStore, key: &FrameKey, delta: i64) -> Option<Frame> {
        let corpus = store.corpus()?;
        let Some(position) = corpus.position_of(key) else {
            debug!(%key, "navigation from unknown frame");
            return None;
        };
        let Some(target) = position.offset(delta, corpus.len()) else {
            debug!(%key, delta, "navigation past the corpus boundary");
            return None;
        };
        corpus.frame_at(target)
    }

    /// Deep-link resolution
    pub fn goto(&self, store: &CorpusStore, key: &FrameKey) -> Option<Frame> {
        self.resolve(store, key, 0)
    }

    pub fn next(&self, store: &CorpusStore, key: &FrameKey) -> Option<Frame> {
        self.resolve(store, key, 1)
    }

    pub fn previous(&self, store: &CorpusStore, key: &FrameKey) -> Option<Frame> {
        self.resolve(store, key, -1)
    }

    pub fn random(&mut self, store: &CorpusStore) -> Option<Frame> {
        let position = store.random_position(&mut self.rng)?;
        store.frame_at(position)
    }
}
