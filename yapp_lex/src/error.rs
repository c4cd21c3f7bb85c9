use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Diagnostics were reported while lexing; the tokens were discarded.
    #[error("input has {} lexical error(s)", errors.len())]
    Malformed { errors: Vec<yapp_common::Error> },

    #[error("lexer still produced tokens after {rounds} rounds")]
    Unbounded { rounds: usize },
}
