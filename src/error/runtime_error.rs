use std::{fmt, rc::Rc};

use crate::{diagnostics::Span, error::write_located, interpreter::environment::Context};

/// What went wrong while evaluating a program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeErrorKind {
    /// Lookup failed in every scope of the chain.
    #[error("{0} is not defined")]
    NotDefined(String),
    /// A binary operation whose operands have kinds that do not combine.
    #[error("Incompatible type from {from} to {to}")]
    IncompatibleType {
        from: &'static str,
        to:   &'static str,
    },
    #[error("'{operator}' operator is not defined for {kind}")]
    UndefinedOperator {
        operator: &'static str,
        kind:     &'static str,
    },
    #[error("'{keyword}' keyword is not defined for {kind}")]
    UndefinedKeyword {
        keyword: &'static str,
        kind:    &'static str,
    },
    #[error("Division by zero")]
    DivisionByZero,
    /// `action` is `removed` or `retrieved`.
    #[error("Element at this index could not be {action} because index is out of bounds")]
    IndexOutOfBounds { action: &'static str },
    #[error("{count} too many arguments passed into {name}")]
    TooManyArguments { count: usize, name: String },
    #[error("{count} too few arguments passed into {name}")]
    TooFewArguments { count: usize, name: String },
    /// A builtin received an argument of the wrong kind.
    #[error("{0}")]
    InvalidArgument(&'static str),
    /// Calling a value that is not a function.
    /// A string repetition whose result would exceed the size limit.
    #[error("Resulting string is too long")]
    StringTooLong,
    #[error("Illegal operation")]
    IllegalOperation,
    /// `for` bounds or step that are not numbers.
    #[error("Incompatible type")]
    InvalidLoopBounds,
    #[error("{0} cannot be used as a condition")]
    NoTruthValue(&'static str),
    #[error("Failed to load script \"{0}\"")]
    ScriptLoad(String),
    #[error("Failed to finish executing script \"{path}\"\n{details}")]
    ScriptFailed { path: String, details: String },
    #[error("Input stream closed")]
    InputClosed,
}

impl RuntimeErrorKind {
    /// Whether an operator error should point at the right operand rather
    /// than at the whole expression.
    pub const fn blames_right_operand(&self) -> bool {
        matches!(self, Self::DivisionByZero | Self::IndexOutOfBounds { .. })
    }
}

/// A runtime error, the span it points at and the context it was raised in.
pub struct RuntimeError {
    pub kind:    RuntimeErrorKind,
    pub span:    Span,
    pub context: Rc<Context>,
}

impl RuntimeError {
    pub const fn new(kind: RuntimeErrorKind, span: Span, context: Rc<Context>) -> Self {
        Self { kind, span, context }
    }

    /// Returns one `(source id, line, frame name)` entry per active call
    /// frame, outermost first.
    ///
    /// The innermost frame is located at the error itself; every outer frame
    /// is located where the inner frame was entered from. Walking stops at the
    /// first context without a recorded entry position, which is the root.
    pub fn frames(&self) -> Vec<(String, usize, String)> {
        let mut frames = Vec::new();
        let mut position = Some(self.span.start.clone());
        let mut context = Some(Rc::clone(&self.context));

        while let (Some(pos), Some(ctx)) = (position, context) {
            frames.push((pos.source.id.clone(), pos.line + 1, ctx.display_name.clone()));
            position = ctx.entry_pos.clone();
            context = ctx.parent.clone();
        }

        frames.reverse();
        frames
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traceback (most recent call last):")?;
        for (source, line, frame) in self.frames() {
            writeln!(f, "    File {source}, line {line}, in {frame}")?;
        }
        write_located(f, "Runtime Error", &self.kind, &self.span)
    }
}

impl fmt::Debug for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeError")
         .field("kind", &self.kind)
         .field("span", &self.span)
         .field("context", &self.context.display_name)
         .finish()
    }
}

impl std::error::Error for RuntimeError {}
