use std::fmt;

use crate::diagnostics::Span;

/// Lexing and parsing errors.
///
/// Everything that can go wrong before evaluation starts: characters the
/// lexer does not recognize, incomplete operators, and grammar violations.
pub mod syntax_error;
/// Runtime errors.
///
/// Errors raised while evaluating a program. Each carries the context it was
/// raised in, which is what the traceback is built from.
pub mod runtime_error;

pub use runtime_error::{RuntimeError, RuntimeErrorKind};
pub use syntax_error::{SyntaxError, SyntaxErrorKind};

/// Any error surfaced by [`crate::run`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Runtime(#[from] Box<RuntimeError>),
}

impl Error {
    /// The source range the error points at.
    pub const fn span(&self) -> &Span {
        match self {
            Self::Syntax(error) => &error.span,
            Self::Runtime(error) => &error.span,
        }
    }

    /// The short title shown before the message, e.g. `Invalid Syntax`.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Syntax(error) => error.kind.title(),
            Self::Runtime(_) => "Runtime Error",
        }
    }
}

/// Writes the common part of every diagnostic: title, message, location line
/// and the caret-underlined snippet.
pub(crate) fn write_located(f: &mut fmt::Formatter<'_>,
                            title: &str,
                            message: &dyn fmt::Display,
                            span: &Span)
                            -> fmt::Result {
    write!(f,
           "{title}: {message}\nFile {}, line {}\n\n{}",
           span.start.source.id,
           span.start.line + 1,
           span.snippet())
}
