use crate::pos::Pos;
use std::cell::RefCell;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub pos: Option<Pos>,
    pub message: String,
}

impl Error {
    pub fn new(pos: Pos, message: String) -> Self {
        Self {
            pos: Some(pos),
            message,
        }
    }

    pub fn standalone(message: String) -> Self {
        Self { pos: None, message }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Sink for positioned diagnostics. Reporting never aborts the caller.
pub trait ErrorReporter {
    fn report(&self, pos: Pos, message: String);
}

impl<T: ErrorReporter + ?Sized> ErrorReporter for &T {
    fn report(&self, pos: Pos, message: String) {
        (**self).report(pos, message)
    }
}

impl<T: ErrorReporter + ?Sized> ErrorReporter for &mut T {
    fn report(&self, pos: Pos, message: String) {
        (**self).report(pos, message)
    }
}

#[derive(Default, Debug)]
pub struct ErrorManager {
    errors: RefCell<Vec<Error>>,
}

impl ErrorManager {
    pub fn push(&self, err: Error) {
        self.errors.borrow_mut().push(err);
    }

    pub fn take(&self) -> Vec<Error> {
        self.errors.take()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_errors()
    }
}

impl ErrorReporter for ErrorManager {
    fn report(&self, pos: Pos, message: String) {
        self.push(Error::new(pos, message));
    }
}
