use crate::lexer::Lexer;
use tracing::trace;

/// Splits its input into one token per character.
///
/// The lexer advances a cursor: the first call returns every remaining
/// character and later calls return nothing until [`CharLexer::reset`].
/// Whitespace is dropped unless [`CharLexer::keep_whitespace`] is set.
#[derive(Debug, Clone)]
pub struct CharLexer {
    input: String,
    cursor: usize,
    keep_whitespace: bool,
}

impl CharLexer {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            cursor: 0,
            keep_whitespace: false,
        }
    }

    pub fn keep_whitespace(mut self) -> Self {
        self.keep_whitespace = true;
        self
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.input.len()
    }
}

impl<D: ?Sized> Lexer<D> for CharLexer {
    type Token = String;

    fn lex(&mut self, _driver: &mut D) -> Vec<String> {
        let rest = &self.input[self.cursor..];
        let tokens: Vec<String> = rest
            .chars()
            .filter(|c| self.keep_whitespace || !c.is_whitespace())
            .map(String::from)
            .collect();

        trace!(from = self.cursor, tokens = tokens.len(), "char lexer batch");
        self.cursor = self.input.len();
        tokens
    }
}
