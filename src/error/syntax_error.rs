use std::fmt;

use crate::{diagnostics::Span, error::write_located};

/// What went wrong while turning text into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    /// A character that cannot start any token.
    #[error("'{0}'")]
    IllegalCharacter(char),
    /// A character that must be followed by another one, such as `!` by `=`.
    #[error("'{expected}' (after '{after}')")]
    ExpectedCharacter { expected: char, after: char },
    /// A grammar violation. The message names the tokens that were legal.
    #[error("{0}")]
    InvalidSyntax(String),
}

impl SyntaxErrorKind {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::IllegalCharacter(_) => "Illegal Character",
            Self::ExpectedCharacter { .. } => "Expected Character",
            Self::InvalidSyntax(_) => "Invalid Syntax",
        }
    }
}

/// A lexing or parsing error together with the source range it refers to.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
}

impl SyntaxError {
    pub const fn new(kind: SyntaxErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Shorthand for an `InvalidSyntax` error.
    pub fn invalid(message: impl Into<String>, span: Span) -> Self {
        Self::new(SyntaxErrorKind::InvalidSyntax(message.into()), span)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_located(f, self.kind.title(), &self.kind, &self.span)
    }
}

impl std::error::Error for SyntaxError {}
