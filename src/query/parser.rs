use crate::analysis::analyzer::Analyzer;
use crate::query::ast::{Query, TermQuery};
use crate::schema::schema::{CombineWith, SearchDefaults};

/// Turns raw criteria into a [`Query`].
///
/// The criteria filter only decides *whether* to search. When anything
/// survives it, the terms come from the original, unfiltered string: a short
/// word next to a long one still narrows the AND.
pub struct QueryParser {
    pub criteria: Analyzer,
    pub terms: Analyzer,
    pub defaults: SearchDefaults,
}

impl QueryParser {
    pub fn new(min_term_len: usize, defaults: SearchDefaults) -> Self {
        QueryParser {
            criteria: Analyzer::criteria(min_term_len),
            terms: Analyzer::caption(),
            defaults,
        }
    }

    /// Filtered criteria: surviving space-separated tokens joined by one space
    pub fn filter(&self, input: &str) -> String {
        self.criteria.terms(input).join(" ")
    }

    pub fn parse(&self, input: &str) -> Query {
        if self.filter(input).is_empty() {
            return Query::Empty;
        }

        let mut terms: Vec<TermQuery> = Vec::new();
        for value in self.terms.terms(input) {
            if terms.iter().any(|t| t.value == value) {
                continue;
            }
            terms.push(TermQuery { value, prefix: self.defaults.prefix });
        }

        match self.defaults.combine_with {
            CombineWith::And => Query::All(terms),
            CombineWith::Or => Query::Any(terms),
        }
    }
}
