use std::collections::HashMap;
use tracing::debug;
use crate::core::config::Config;
use crate::core::corpus::{Corpus, CorpusStore};
use crate::core::types::Position;
use crate::index::inverted::InvertedIndex;
use crate::index::posting::PostingList;
use crate::query::ast::{Query, TermQuery};
use crate::query::cache::{CacheStats, QueryCache};
use crate::query::parser::QueryParser;
use crate::schema::schema::IndexSchema;
use crate::scoring::scorer::{Bm25PlusScorer, DocStats, Scorer};
use crate::search::results::{dedup_by_key, rank, ScoredMatch, SearchOutcome};

/// Turns raw criteria into a bounded, deduplicated, ranked list of frames
pub struct QueryEngine {
    pub parser: QueryParser,
    pub scorer: Box<dyn Scorer>,
    pub cache: QueryCache,
    pub prefix_weight: f64,
    pub max_results: usize,
}

impl QueryEngine {
    pub fn new(config: &Config, schema: &IndexSchema) -> Self {
        QueryEngine {
            parser: QueryParser::new(config.min_term_len, schema.search),
            scorer: Box::new(Bm25PlusScorer::new(config.bm25)),
            cache: QueryCache::new(config.cache_size),
            prefix_weight: config.prefix_weight,
            max_results: config.max_results,
        }
    }

    /// Run `criteria` against the store. `None` while the store is not ready:
    /// nothing is queued, the caller re-issues once ready.
    pub fn search(&mut self, store: &CorpusStore, criteria: &str) -> Option<SearchOutcome> {
        let Some(corpus) = store.corpus() else {
            debug!(criteria, "search ignored, index not ready");
            return None;
        };

        if let Some(outcome) = self.cache.get(criteria) {
            debug!(criteria, hits = outcome.frames.len(), "search served from cache");
            return Some(outcome);
        }

        let outcome = self.execute(corpus, criteria);
        debug!(criteria, did_search = outcome.did_search, hits = outcome.frames.len(), "search executed");
        self.cache.put(criteria, outcome.clone());
        Some(outcome)
    }

    pub fn execute(&self, corpus: &Corpus, criteria: &str) -> SearchOutcome {
        let query = self.parser.parse(criteria);
        if query.is_empty() {
            return SearchOutcome::skipped();
        }

        let mut matches = self.execute_query(corpus.index(), &query);
        rank(&mut matches);

        // Rank order is kept; the best-scored occurrence of a frame wins
        let positions: Vec<Position> = matches.iter().map(|m| m.position).collect();
        let mut unique = dedup_by_key(positions, |p| corpus.frame_key_at(*p));
        unique.truncate(self.max_results);

        SearchOutcome {
            did_search: true,
            frames: unique.into_iter().filter_map(|p| corpus.frame_at(p)).collect(),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn execute_query(&self, index: &InvertedIndex, query: &Query) -> Vec<ScoredMatch> {
        let mut per_term = query.terms().iter().map(|term| self.execute_term(index, term));

        let combined = match query {
            Query::Empty => HashMap::new(),
            Query::All(_) => {
                let Some(mut acc) = per_term.next() else {
                    return Vec::new();
                };
                for mut next in per_term {
                    acc.retain(|position, _| next.contains_key(position));
                    for (position, found) in acc.iter_mut() {
                        if let Some(other) = next.remove(position) {
                            found.merge(other);
                        }
                    }
                    if acc.is_empty() {
                        break;
                    }
                }
                acc
            }
            Query::Any(_) => {
                let mut acc: HashMap<Position, ScoredMatch> = HashMap::new();
                for next in per_term {
                    for (position, other) in next {
                        match acc.get_mut(&position) {
                            Some(found) => found.merge(other),
                            None => {
                                acc.insert(position, other);
                            }
                        }
                    }
                }
                acc
            }
        };

        combined
            .into_values()
            .map(|mut m| {
                // Documents matching more distinct query terms rank higher
                m.score *= m.query_terms.len().max(1) as f64;
                m
            })
            .collect()
    }

    fn execute_term(&self, index: &InvertedIndex, term: &TermQuery) -> HashMap<Position, ScoredMatch> {
        let mut results = HashMap::new();

        if !term.prefix {
            if let Some(list) = index.search_term(&term.value) {
                self.collect_postings(index, list, 1.0, &term.value, &mut results);
            }
            return results;
        }

        let query_len = term.value.chars().count();
        for (derived, list) in index.expand_prefix(&term.value) {
            let derived_len = derived.chars().count() as f64;
            let distance = derived_len - query_len as f64;
            let weight = if distance <= 0.0 {
                1.0
            } else {
                self.prefix_weight * derived_len / (derived_len + 0.3 * distance)
            };
            self.collect_postings(index, list, weight, &term.value, &mut results);
        }

        results
    }

    fn collect_postings(
        &self,
        index: &InvertedIndex,
        list: &PostingList,
        weight: f64,
        source_term: &str,
        results: &mut HashMap<Position, ScoredMatch>,
    ) {
        for field in list.fields.iter().filter(|f| index.is_searchable(f.field)) {
            let doc_freq = field.doc_freq();
            let avg_field_length = index.avg_field_length(field.field);

            for posting in &field.postings {
                let stats = DocStats {
                    field_length: index.field_length(posting.position, field.field),
                    avg_field_length,
                    total_docs: index.doc_count,
                };
                let score = weight * self.scorer.score(posting.term_freq, doc_freq, &stats);

                let found = results
                    .entry(posting.position)
                    .or_insert_with(|| ScoredMatch::new(posting.position));
                found.score += score;
                found.add_term(source_term);
            }
        }
    }
}
