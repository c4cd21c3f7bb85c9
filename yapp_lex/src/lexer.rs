use crate::error::LexError;
use tracing::debug;
use yapp_common::ErrorManager;

/// A source of tokens for a parser driver.
///
/// `D` is whatever context the driver hands over; implementations that need
/// something from it (a diagnostic sink, a symbol table) put a bound on `D`.
///
/// `lex` never fails. Malformed input is reported through the driver and
/// still yields a best-effort token, so the parser decides how to recover.
/// Use [`lex_strict`] to turn reported diagnostics into an error.
///
/// Implementations are free to be stateful: a lexer that advances a cursor
/// returns an empty batch once its input is exhausted, while an idempotent
/// one returns the same batch on every call.
pub trait Lexer<D: ?Sized> {
    type Token;

    fn lex(&mut self, driver: &mut D) -> Vec<Self::Token>;
}

impl<D: ?Sized, L: Lexer<D> + ?Sized> Lexer<D> for &mut L {
    type Token = L::Token;

    fn lex(&mut self, driver: &mut D) -> Vec<Self::Token> {
        (**self).lex(driver)
    }
}

impl<D: ?Sized, L: Lexer<D> + ?Sized> Lexer<D> for Box<L> {
    type Token = L::Token;

    fn lex(&mut self, driver: &mut D) -> Vec<Self::Token> {
        (**self).lex(driver)
    }
}

pub const DEFAULT_MAX_ROUNDS: usize = 1 << 16;

/// Calls `lex` until it returns an empty batch and concatenates the batches.
///
/// An idempotent lexer never returns an empty batch, so the loop gives up
/// once `max_rounds` non-empty batches were collected and the next call still
/// produced tokens.
pub fn lex_to_end<D, L>(lexer: &mut L, driver: &mut D, max_rounds: usize) -> Result<Vec<L::Token>, LexError>
where
    D: ?Sized,
    L: Lexer<D> + ?Sized,
{
    let mut tokens = Vec::default();
    let mut rounds = 0;
    loop {
        let batch = lexer.lex(driver);
        if batch.is_empty() {
            debug!(rounds, tokens = tokens.len(), "lexer drained");
            return Ok(tokens);
        }
        if rounds == max_rounds {
            return Err(LexError::Unbounded { rounds });
        }
        rounds += 1;
        tokens.extend(batch);
    }
}

/// Lexes once with `errors` as the driver and fails if that call reported
/// any diagnostic. Diagnostics already present before the call are kept in
/// `errors` and do not count.
pub fn lex_strict<L>(lexer: &mut L, errors: &mut ErrorManager) -> Result<Vec<L::Token>, LexError>
where
    L: Lexer<ErrorManager> + ?Sized,
{
    let reported = errors.len();
    let tokens = lexer.lex(errors);
    if errors.len() == reported {
        return Ok(tokens);
    }

    let mut all = errors.take();
    let fresh = all.split_off(reported);
    for err in all {
        errors.push(err);
    }
    debug!(errors = fresh.len(), "strict lexing rejected input");
    Err(LexError::Malformed { errors: fresh })
}
