use std::collections::HashSet;
use std::hash::Hash;
use serde::{Serialize, Deserialize};
use crate::core::types::{Frame, Position};

/// What a search hands back to the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// `false` when the criteria filter left nothing to search for,
    /// `true` when a query ran, even if it matched nothing
    pub did_search: bool,
    pub frames: Vec<Frame>,
}

impl SearchOutcome {
    pub fn skipped() -> Self {
        SearchOutcome::default()
    }
}

/// Document with relevance score
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    pub position: Position,
    pub score: f64,
    pub query_terms: Vec<String>,   // distinct query terms that matched
}

impl ScoredMatch {
    pub fn new(position: Position) -> Self {
        ScoredMatch {
            position,
            score: 0.0,
            query_terms: Vec::new(),
        }
    }

    pub fn add_term(&mut self, term: &str) {
        if !self.query_terms.iter().any(|t| t == term) {
            self.query_terms.push(term.to_string());
        }
    }

    /// Fold another match of the same document into this one
    pub fn merge(&mut self, other: ScoredMatch) {
        self.score += other.score;
        for term in &other.query_terms {
            self.add_term(term);
        }
    }
}

/// Highest score first. Equal scores keep corpus order so repeated
/// searches return identical lists.
pub fn rank(matches: &mut [ScoredMatch]) {
    matches.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.position.cmp(&b.position))
    });
}

/// Keep the first occurrence of every key, preserving order.
pub fn dedup_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(position: u32, score: f64) -> ScoredMatch {
        ScoredMatch { position: Position(position), score, query_terms: vec![] }
    }

    #[test]
    fn rank_orders_by_score_then_position() {
        let mut matches = vec![scored(3, 1.0), scored(1, 2.0), scored(0, 1.0)];
        rank(&mut matches);
        let order: Vec<u32> = matches.iter().map(|m| m.position.0).collect();
        assert_eq!(order, vec![1, 0, 3]);
    }

    #[test]
    fn dedup_keeps_first_seen() {
        let items = vec![("a", 1), ("b", 2), ("a", 3), ("c", 4), ("b", 5)];
        let kept = dedup_by_key(items, |(k, _)| *k);
        assert_eq!(kept, vec![("a", 1), ("b", 2), ("c", 4)]);
    }

    #[test]
    fn merge_sums_scores_and_unions_terms() {
        let mut a = scored(0, 1.5);
        a.add_term("horse");
        let mut b = scored(0, 0.5);
        b.add_term("horse");
        b.add_term("man");
        a.merge(b);
        assert!((a.score - 2.0).abs() < f64::EPSILON);
        assert_eq!(a.query_terms, vec!["horse", "man"]);
    }
}
