use crate::{
    ast::Node,
    diagnostics::Position,
    error::SyntaxError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            statement::parse_statements,
            utils::{TRAILING_OPERATOR_EXPECTED, error_here},
        },
    },
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// A cursor over a token slice.
///
/// Cloning is cheap, which is how lookahead and backtracking are done: parse
/// against a clone and copy it back on success.
///
/// The slice must end with an `Eof` token. The cursor never moves past it.
#[derive(Clone, Debug)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    index:  usize,
}

impl<'a> TokenStream<'a> {
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    /// Returns the current token without consuming it.
    ///
    /// # Panics
    /// Panics if the stream was created from an empty slice.
    pub fn peek(&self) -> &'a Token {
        &self.tokens[self.index]
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    /// Number of tokens consumed so far.
    pub const fn position(&self) -> usize {
        self.index
    }

    /// End of the most recently consumed token, or the start of the current
    /// one when nothing has been consumed.
    pub fn last_end(&self) -> Position {
        match self.index.checked_sub(1) {
            Some(previous) => self.tokens[previous].span.end.clone(),
            None => self.peek().span.start.clone(),
        }
    }
}

/// Runs `parse` speculatively.
///
/// On success the stream is advanced past what was parsed. A failure that
/// consumed no tokens leaves the stream untouched and yields `Ok(None)`; a
/// failure after consuming tokens is a real syntax error and is returned.
///
/// # Parameters
/// - `tokens`: The stream to parse from.
/// - `parse`: The sub-parser to try.
///
/// # Returns
/// `Some(node)` if the sub-parse succeeded, `None` if it could not start.
pub fn attempt<'a, T>(tokens: &mut TokenStream<'a>,
                      parse: impl FnOnce(&mut TokenStream<'a>) -> ParseResult<T>)
                      -> ParseResult<Option<T>> {
    let mut lookahead = tokens.clone();
    match parse(&mut lookahead) {
        Ok(node) => {
            *tokens = lookahead;
            Ok(Some(node))
        },
        Err(_) if lookahead.position() == tokens.position() => Ok(None),
        Err(error) => Err(error),
    }
}

/// Parses a whole program.
///
/// The root is the top-level statement list. Anything left over before `Eof`
/// is reported as a missing operator.
///
/// # Errors
/// Returns an `InvalidSyntax` error for the first grammar violation.
///
/// # Example
/// ```
/// use basic::{
///     ast::Node,
///     diagnostics::Source,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize(&Source::new("<test>", "var a = 1\na")).unwrap();
/// let Node::ListLiteral { elements, .. } = parse(&tokens).unwrap() else {
///     panic!("program root is a statement list");
/// };
///
/// assert_eq!(elements.len(), 2);
/// assert!(parse(&tokenize(&Source::new("<test>", "1 2")).unwrap()).is_err());
/// ```
pub fn parse(tokens: &[Token]) -> ParseResult<Node> {
    let mut stream = TokenStream::new(tokens);
    let program = parse_statements(&mut stream)?;

    if !stream.peek().matches(&TokenKind::Eof) {
        return Err(error_here(&stream, TRAILING_OPERATOR_EXPECTED));
    }

    Ok(program)
}
