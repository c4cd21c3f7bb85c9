use crate::lexer::Lexer;

/// Returns the same fixed tokens on every call, ignoring the driver.
#[derive(Debug, Clone, Default)]
pub struct ReplayLexer<T> {
    tokens: Vec<T>,
}

impl<T> ReplayLexer<T> {
    pub fn new(tokens: Vec<T>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }
}

impl<T> FromIterator<T> for ReplayLexer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<D: ?Sized, T: Clone> Lexer<D> for ReplayLexer<T> {
    type Token = T;

    fn lex(&mut self, _driver: &mut D) -> Vec<T> {
        self.tokens.clone()
    }
}
