use crate::config::ScannerConfig;
use crate::error::LexError;
use crate::lexer::Lexer;
use crate::number::Number;
use crate::token::{Token, TokenKind};
use num::BigInt;
use std::path::PathBuf;
use tracing::{debug, trace};
use yapp_common::{ErrorReporter, FileManager, Pos, SourceFile};

/// Configurable lexer over a single source file.
///
/// Each call to `lex` scans everything left in the file, so the second call
/// returns an empty batch. Lexical errors go to the driver's
/// [`ErrorReporter`]; an unrecognised character becomes
/// [`TokenKind::Invalid`].
pub struct Scanner {
    file_offset: Pos,
    text: String,
    offset: usize,
    config: ScannerConfig,
}

impl Scanner {
    pub fn new(file: SourceFile, config: ScannerConfig) -> Self {
        Self {
            file_offset: file.offset,
            text: file.text,
            offset: 0,
            config,
        }
    }

    pub fn open(files: &mut FileManager, path: PathBuf, config: ScannerConfig) -> Result<Self, LexError> {
        match files.open(path.clone()) {
            Ok(file) => Ok(Self::new(file, config)),
            Err(source) => Err(LexError::Io { path, source }),
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn is_exhausted(&self) -> bool {
        self.text[self.offset..].trim_start().is_empty()
    }
}

impl<D: ErrorReporter + ?Sized> Lexer<D> for Scanner {
    type Token = Token;

    fn lex(&mut self, driver: &mut D) -> Vec<Token> {
        let mut cursor = Cursor {
            errors: &*driver,
            config: &self.config,
            text: &self.text,
            file_offset: self.file_offset,
            offset: self.offset,
        };

        let mut tokens = Vec::default();
        while let Some(token) = cursor.scan() {
            trace!(kind = %token.kind, value = %token.value, "scanned");
            if token.kind == TokenKind::Comment && !self.config.keep_comments {
                continue;
            }
            tokens.push(token);
        }

        debug!(from = self.offset, to = cursor.offset, tokens = tokens.len(), "scanner batch");
        self.offset = cursor.offset;
        tokens
    }
}

struct Cursor<'a, E: ?Sized> {
    errors: &'a E,
    config: &'a ScannerConfig,
    text: &'a str,
    file_offset: Pos,
    offset: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u32)]
enum Base {
    Bin = 2,
    Oct = 8,
    Dec = 10,
    Hex = 16,
}

#[derive(PartialEq, Eq)]
enum NumberPart {
    Done,
    Fraction,
    Exponent,
}

impl<'a, E: ErrorReporter + ?Sized> Cursor<'a, E> {
    fn scan(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let start = self.offset;
        let kind = self
            .scan_comment()
            .or_else(|| self.scan_word())
            .or_else(|| self.scan_char_lit())
            .or_else(|| self.scan_string_lit())
            .or_else(|| self.scan_number_lit())
            .or_else(|| self.scan_symbol())
            .or_else(|| self.scan_invalid())?;
        if self.offset == start {
            return None;
        }

        Some(Token {
            kind,
            value: self.text[start..self.offset].to_string(),
            pos: self.file_offset.with_offset(start),
        })
    }

    fn skip_whitespace(&mut self) {
        while self.next_if(char::is_whitespace).is_some() {}
    }

    fn scan_comment(&mut self) -> Option<TokenKind> {
        let prefix = self.config.comment_prefix.as_deref()?;
        if prefix.is_empty() || !self.rest().starts_with(prefix) {
            return None;
        }

        self.offset += prefix.len();
        while self.next_if(|c| c != '\n').is_some() {}
        Some(TokenKind::Comment)
    }

    fn scan_word(&mut self) -> Option<TokenKind> {
        let start = self.offset;
        self.next_if(|c| c.is_alphabetic() || c == '_')?;
        while self.next_if(|c| c.is_alphanumeric() || c == '_').is_some() {}

        if self.config.keywords.contains(&self.text[start..self.offset]) {
            Some(TokenKind::Keyword)
        } else {
            Some(TokenKind::Ident)
        }
    }

    fn scan_char_lit(&mut self) -> Option<TokenKind> {
        self.next_if(|c| c == '\'')?;

        let value = match self.peek() {
            Some(('\'', pos)) => {
                self.errors.report(pos, String::from("Empty character literal"));
                '\0'
            }
            Some(('\\', _)) => self.scan_escape().map(char::from).unwrap_or('\0'),
            Some(('\n', _)) | None => '\0',
            Some((c, _)) => {
                self.next();
                c
            }
        };

        let mut found_multichar = false;
        loop {
            match self.peek() {
                Some(('\'', _)) => {
                    self.next();
                    break;
                }
                Some(('\n', _)) | None => {
                    self.errors
                        .report(self.get_pos(), String::from("Missing closing quote in character literal"));
                    break;
                }
                Some((_, pos)) => {
                    self.next();
                    if !found_multichar {
                        self.errors.report(
                            pos,
                            String::from("Character literal may only contain one code point"),
                        );
                        found_multichar = true;
                    }
                }
            }
        }

        Some(TokenKind::CharLit(value))
    }

    fn scan_string_lit(&mut self) -> Option<TokenKind> {
        self.next_if(|c| c == '"')?;

        let mut value = Vec::default();
        loop {
            match self.peek() {
                Some(('"', _)) => {
                    self.next();
                    break;
                }
                Some(('\n', _)) | None => {
                    self.errors
                        .report(self.get_pos(), String::from("Missing closing quote in string literal"));
                    break;
                }
                Some(('\\', _)) => {
                    if let Some(byte) = self.scan_escape() {
                        value.push(byte);
                    }
                }
                Some((c, _)) => {
                    self.next();
                    let buff = &mut [0u8; 4];
                    value.extend_from_slice(c.encode_utf8(buff).as_bytes());
                }
            }
        }

        Some(TokenKind::StringLit(value))
    }

    /// Consumes a backslash escape and returns the byte it denotes.
    fn scan_escape(&mut self) -> Option<u8> {
        self.next_if(|c| c == '\\')?;
        let (c, pos) = self.next_if(|c| c != '\n')?;
        match c {
            'n' => Some(b'\n'),
            'r' => Some(b'\r'),
            't' => Some(b'\t'),
            '\\' => Some(b'\\'),
            '0' => Some(0),
            '\'' => Some(b'\''),
            '"' => Some(b'"'),
            'x' => {
                let high = self.scan_hex_digit()?;
                let low = self.scan_hex_digit()?;
                Some(high << 4 | low)
            }
            _ => {
                self.errors.report(pos, format!("Unknown escape sequence '\\{c}'"));
                None
            }
        }
    }

    fn scan_hex_digit(&mut self) -> Option<u8> {
        let (c, pos) = self.peek()?;
        match c.to_digit(16) {
            Some(digit) => {
                self.next();
                Some(digit as u8)
            }
            None => {
                self.errors.report(pos, format!("Unexpected char '{c}'"));
                None
            }
        }
    }

    fn scan_number_lit(&mut self) -> Option<TokenKind> {
        let (c, _) = self.peek()?;
        if !c.is_ascii_digit() {
            return None;
        }

        let base = self.scan_number_prefix();
        let mut value = Number::default();

        let mut next = self.scan_number_digits(base, &mut value, false);
        if next == NumberPart::Fraction {
            self.next();
            next = self.scan_number_digits(base, &mut value, true);
        }
        if next == NumberPart::Exponent {
            self.next();
            self.scan_number_exponent(&mut value);
        }

        Some(TokenKind::NumberLit(value))
    }

    fn scan_number_prefix(&mut self) -> Base {
        let rest = self.rest();
        for (prefix, base) in [("0x", Base::Hex), ("0b", Base::Bin), ("0o", Base::Oct)] {
            if rest.starts_with(prefix) {
                self.offset += prefix.len();
                return base;
            }
        }

        if rest.starts_with('0') && rest[1..].starts_with(|c: char| c.is_ascii_digit()) {
            self.offset += 1;
            return Base::Oct;
        }

        Base::Dec
    }

    fn scan_number_digits(&mut self, base: Base, value: &mut Number, fraction: bool) -> NumberPart {
        let radix = base as u32;
        while let Some((c, pos)) = self.peek_skip_underscore() {
            if let Some(digit) = c.to_digit(radix) {
                self.next();
                value.val *= radix;
                value.val += digit;
                if fraction {
                    value.exp -= 1u32;
                }
            } else if c.is_ascii_digit() {
                self.next();
                self.errors
                    .report(pos, format!("Cannot use '{c}' in {radix}-base integer literal"));
            } else if base == Base::Dec && matches!(c, 'e' | 'E') {
                return NumberPart::Exponent;
            } else if base == Base::Dec && c == '.' && !fraction {
                return NumberPart::Fraction;
            } else if c.is_alphabetic() {
                self.scan_number_invalid_suffix();
                return NumberPart::Done;
            } else {
                break;
            }
        }

        NumberPart::Done
    }

    fn scan_number_exponent(&mut self, value: &mut Number) {
        let negative = self.next_if(|c| c == '-').is_some();
        if !negative {
            self.next_if(|c| c == '+');
        }

        let mut exp = BigInt::default();
        let mut has_digits = false;
        while let Some((c, _)) = self.peek_skip_underscore() {
            if let Some(digit) = c.to_digit(10) {
                self.next();
                exp *= 10u32;
                exp += digit;
                has_digits = true;
            } else if c.is_alphabetic() {
                Self::apply_exponent(value, exp, negative);
                self.scan_number_invalid_suffix();
                return;
            } else {
                break;
            }
        }

        if !has_digits {
            self.errors
                .report(self.get_pos(), String::from("The exponent has no digits"));
        }
        Self::apply_exponent(value, exp, negative);
    }

    fn apply_exponent(value: &mut Number, exp: BigInt, negative: bool) {
        if negative {
            value.exp -= exp;
        } else {
            value.exp += exp;
        }
    }

    fn scan_number_invalid_suffix(&mut self) {
        let start = self.offset;
        let pos = self.get_pos();
        while self.next_if(|c| c.is_alphanumeric() || c == '_').is_some() {}

        let suffix = &self.text[start..self.offset];
        self.errors
            .report(pos, format!("Invalid suffix \"{suffix}\" for number literal"));
    }

    fn scan_symbol(&mut self) -> Option<TokenKind> {
        let len = self.config.longest_symbol(self.rest())?;
        self.offset += len;
        Some(TokenKind::Symbol)
    }

    fn scan_invalid(&mut self) -> Option<TokenKind> {
        let (c, pos) = self.next()?;
        self.errors.report(pos, format!("Unexpected char '{c}'"));
        Some(TokenKind::Invalid(c))
    }

    fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    fn peek_skip_underscore(&mut self) -> Option<(char, Pos)> {
        while self.next_if(|c| c == '_').is_some() {}
        self.peek()
    }

    fn next_if(&mut self, func: impl FnOnce(char) -> bool) -> Option<(char, Pos)> {
        let (c, _) = self.peek()?;
        if func(c) {
            self.next()
        } else {
            None
        }
    }

    fn next(&mut self) -> Option<(char, Pos)> {
        let (c, pos) = self.peek()?;
        self.offset += c.len_utf8();
        Some((c, pos))
    }

    fn peek(&self) -> Option<(char, Pos)> {
        let c = self.rest().chars().next()?;
        Some((c, self.get_pos()))
    }

    fn get_pos(&self) -> Pos {
        self.file_offset.with_offset(self.offset)
    }
}
