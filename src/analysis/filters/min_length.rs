use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Drops tokens shorter than `min_chars` characters. Dropped tokens are gone,
/// they are never matched as substrings of anything else.
#[derive(Clone, Copy)]
pub struct MinLengthFilter {
    pub min_chars: usize,
}

impl MinLengthFilter {
    pub fn new(min_chars: usize) -> Self {
        MinLengthFilter { min_chars }
    }
}

impl TokenFilter for MinLengthFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .filter(|token| token.text.chars().count() >= self.min_chars)
            .collect()
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(*self)
    }
}
