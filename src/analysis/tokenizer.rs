use std::sync::LazyLock;
use regex::Regex;
use crate::analysis::token::Token;

/// Line breaks, Unicode separators and Unicode punctuation. Tabs and symbols
/// such as `$` or `+` are not separators.
static CAPTION_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\r\p{Z}\p{P}]+").expect("static separator pattern"));

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

/// Splits captions into terms exactly where the index builder did.
#[derive(Clone, Default)]
pub struct CaptionTokenizer;

impl Tokenizer for CaptionTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        CAPTION_SEPARATOR
            .split(text)
            .filter(|piece| !piece.is_empty())
            .map(Token::new)
            .collect()
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(CaptionTokenizer)
    }
}

/// Splits on the ASCII space only. Used for criteria filtering, where the raw
/// string typed by the user is cut exactly at spaces.
#[derive(Clone, Default)]
pub struct SpaceTokenizer;

impl Tokenizer for SpaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split(' ').map(Token::new).collect()
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(SpaceTokenizer)
    }
}
