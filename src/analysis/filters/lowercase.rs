use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Folds terms to lowercase, the same normalization the index builder applies
/// to caption text.
#[derive(Clone, Copy, Default)]
pub struct LowercaseFilter;

impl TokenFilter for LowercaseFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .map(|mut token| {
                if token.text.chars().any(char::is_uppercase) {
                    token.text = token.text.to_lowercase();
                }
                token
            })
            .collect()
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(*self)
    }
}
