use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::filters::min_length::MinLengthFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{CaptionTokenizer, SpaceTokenizer, Tokenizer};

/// Text analysis pipeline
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
}

impl Clone for Analyzer {
    fn clone(&self) -> Self {
        Analyzer {
            tokenizer: self.tokenizer.clone_box(),
            filters: self.filters.iter().map(|f| f.clone_box()).collect(),
        }
    }
}

impl Analyzer {
    pub fn new(tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Analyzed term strings, in input order.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).into_iter().map(|t| t.text).collect()
    }

    /// Turns a query into index terms. Has to agree with the index builder's
    /// caption analysis, otherwise nothing matches.
    pub fn caption() -> Self {
        Analyzer::new(Box::new(CaptionTokenizer))
            .add_filter(Box::new(LowercaseFilter))
    }

    /// Noise filter applied to raw criteria before any search runs.
    pub fn criteria(min_chars: usize) -> Self {
        Analyzer::new(Box::new(SpaceTokenizer))
            .add_filter(Box::new(MinLengthFilter::new(min_chars)))
    }
}
