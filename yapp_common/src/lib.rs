mod errors;
mod file;
mod pos;

pub use errors::{Error, ErrorManager, ErrorReporter};
pub use file::{FileManager, Location, SourceFile};
pub use pos::Pos;
