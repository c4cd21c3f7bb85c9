use crate::number::Number;
use std::fmt::Display;
use yapp_common::Pos;

/// Token produced by [`Scanner`](crate::Scanner). `value` is the raw source
/// text the token was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Invalid(char),
    Comment,
    Ident,
    Keyword,
    Symbol,
    NumberLit(Number),
    StringLit(Vec<u8>),
    CharLit(char),
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(..) => write!(f, "INVALID"),
            Self::Comment => write!(f, "COMMENT"),
            Self::Ident => write!(f, "IDENT"),
            Self::Keyword => write!(f, "KEYWORD"),
            Self::Symbol => write!(f, "SYMBOL"),
            Self::NumberLit(..) => write!(f, "NUMBER_LIT"),
            Self::StringLit(..) => write!(f, "STRING_LIT"),
            Self::CharLit(..) => write!(f, "CHAR_LIT"),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.kind, self.value)
    }
}
