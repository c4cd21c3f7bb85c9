//! Lexer capability shared by generated parser drivers, plus a few lexers
//! implementing it.
//!
//! A driver calls [`Lexer::lex`] with itself as context and receives the
//! tokens to parse. The context and the token type are both chosen by the
//! two sides of that call, never by the trait.

mod char_lexer;
mod config;
mod error;
mod lexer;
mod number;
mod replay;
mod scanner;
mod token;

pub use char_lexer::CharLexer;
pub use config::ScannerConfig;
pub use error::LexError;
pub use lexer::{lex_strict, lex_to_end, Lexer, DEFAULT_MAX_ROUNDS};
pub use number::{Number, TryFromNumberError};
pub use replay::ReplayLexer;
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
