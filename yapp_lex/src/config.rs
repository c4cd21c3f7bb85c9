use indexmap::IndexSet;

const DEFAULT_SYMBOLS: &[&str] = &[
    "::", ":", ";", ".", ",", "!=", "!", "==", "=", "*", "+", "-", "/", "%", "<<", "<=", "<", ">>",
    ">=", ">", "{", "}", "(", ")", "[", "]", "&&", "&", "||", "|", "^", "~", "@", "?", "->", "=>",
];

/// What the [`Scanner`](crate::Scanner) recognises beyond identifiers,
/// numbers and quoted literals.
///
/// Symbols are matched longest first, so `<<` wins over `<` regardless of
/// insertion order.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub keywords: IndexSet<String>,
    pub symbols: IndexSet<String>,
    pub comment_prefix: Option<String>,
    pub keep_comments: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            keywords: IndexSet::default(),
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            comment_prefix: Some(String::from("//")),
            keep_comments: false,
        }
    }
}

impl ScannerConfig {
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols
            .extend(symbols.into_iter().map(Into::into).filter(|s: &String| !s.is_empty()));
        self
    }

    pub fn without_default_symbols(mut self) -> Self {
        self.symbols.clear();
        self
    }

    pub fn with_comment_prefix(mut self, prefix: Option<String>) -> Self {
        self.comment_prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    pub(crate) fn longest_symbol(&self, text: &str) -> Option<usize> {
        self.symbols
            .iter()
            .filter(|sym| !sym.is_empty() && text.starts_with(sym.as_str()))
            .map(|sym| sym.len())
            .max()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_longest_symbol() {
        let config = ScannerConfig::default();
        assert_eq!(config.longest_symbol("<<= 1"), Some(2));
        assert_eq!(config.longest_symbol("-> x"), Some(2));
        assert_eq!(config.longest_symbol("x"), None);

        let config = config.with_symbols(["<<="]);
        assert_eq!(config.longest_symbol("<<= 1"), Some(3));
    }

    #[test]
    fn test_empty_entries_are_ignored() {
        let config = ScannerConfig::default()
            .without_default_symbols()
            .with_symbols([""])
            .with_comment_prefix(Some(String::new()));
        assert!(config.symbols.is_empty());
        assert!(config.comment_prefix.is_none());
        assert_eq!(config.longest_symbol("abc"), None);

        let mut config = ScannerConfig::default().without_default_symbols();
        config.symbols.insert(String::new());
        assert_eq!(config.longest_symbol("abc"), None);
        assert_eq!(config.longest_symbol(""), None);
    }
}
