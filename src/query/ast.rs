/// One query term after analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    pub value: String,
    pub prefix: bool,   // also match dictionary terms that extend `value`
}

/// A parsed search criteria string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Nothing survived the criteria filter; no search runs
    Empty,
    /// Every term must match (AND)
    All(Vec<TermQuery>),
    /// Any term may match (OR)
    Any(Vec<TermQuery>),
}

impl Query {
    pub fn is_empty(&self) -> bool {
        matches!(self, Query::Empty)
    }

    pub fn terms(&self) -> &[TermQuery] {
        match self {
            Query::Empty => &[],
            Query::All(terms) | Query::Any(terms) => terms,
        }
    }
}
