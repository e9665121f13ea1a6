use crate::{
    ast::Node,
    diagnostics::Span,
    error::SyntaxError,
    interpreter::{
        lexer::{Keyword, Token, TokenKind},
        parser::{
            binary::parse_expression,
            core::{ParseResult, TokenStream},
        },
    },
};

pub const STATEMENT_EXPECTED: &str = "Expected 'return', 'continue', 'break', 'var', 'if', 'for', \
                                      'while', 'function', int, float, identifier, '+', '-', '(', \
                                      '[' or 'not'";
pub const EXPRESSION_EXPECTED: &str = "Expected 'var', 'if', 'for', 'while', 'function', int, \
                                       float, identifier, '+', '-', '(', '[' or 'not'";
pub const COMPARISON_EXPECTED: &str =
    "Expected int, float, identifier, '+', '-', '(', '[' or 'not'";
pub const ATOM_EXPECTED: &str = "Expected int, float, identifier, '+', '-', '(', '[', 'if', \
                                 'for', 'while' or 'function'";
pub const ARGUMENT_EXPECTED: &str = "Expected ')', 'var', 'if', 'for', 'while', 'function', int, \
                                     float, identifier, '+', '-', '(', '[' or 'not'";
pub const ELEMENT_EXPECTED: &str = "Expected ']', 'var', 'if', 'for', 'while', 'function', int, \
                                    float, identifier, '+', '-', '(', '[' or 'not'";
pub const TRAILING_OPERATOR_EXPECTED: &str = "Expected '+', '-', '*', '/', '^', '==', '!=', '<', \
                                              '>', '<=', '>=', 'and' or 'or'";

/// Builds an `InvalidSyntax` error pointing at the current token.
pub(in crate::interpreter::parser) fn error_here(tokens: &TokenStream<'_>,
                                                 message: &str)
                                                 -> SyntaxError {
    SyntaxError::invalid(message, tokens.peek().span.clone())
}

/// Replaces the error of a rule that failed without consuming any token
/// since `start` by one naming everything the rule itself could have begun
/// with. Errors from deeper inside a partially parsed construct are kept.
pub(in crate::interpreter::parser) fn with_expectation<T>(tokens: &TokenStream<'_>,
                                                          start: usize,
                                                          result: ParseResult<T>,
                                                          message: &str)
                                                          -> ParseResult<T> {
    match result {
        Err(_) if tokens.position() == start => Err(error_here(tokens, message)),
        other => other,
    }
}

/// Consumes a token of the given kind or fails with `message`.
pub(in crate::interpreter::parser) fn expect<'a>(tokens: &mut TokenStream<'a>,
                                                 kind: &TokenKind,
                                                 message: &str)
                                                 -> ParseResult<&'a Token> {
    if tokens.peek().matches(kind) {
        Ok(tokens.advance())
    } else {
        Err(error_here(tokens, message))
    }
}

/// Consumes the given keyword or fails with `Expected '<keyword>'`.
pub(in crate::interpreter::parser) fn expect_keyword<'a>(tokens: &mut TokenStream<'a>,
                                                         keyword: Keyword)
                                                         -> ParseResult<&'a Token> {
    if tokens.peek().is_keyword(keyword) {
        Ok(tokens.advance())
    } else {
        Err(error_here(tokens, &format!("Expected '{keyword}'")))
    }
}

/// Consumes an identifier and returns its name.
pub(in crate::interpreter::parser) fn expect_identifier(tokens: &mut TokenStream<'_>,
                                                        message: &str)
                                                        -> ParseResult<String> {
    match &tokens.peek().kind {
        TokenKind::Identifier(name) => {
            tokens.advance();
            Ok(name.clone())
        },
        _ => Err(error_here(tokens, message)),
    }
}

/// Skips statement separators and returns how many were skipped.
pub(in crate::interpreter::parser) fn skip_newlines(tokens: &mut TokenStream<'_>) -> usize {
    let mut count = 0;
    while tokens.peek().matches(&TokenKind::Newline) {
        tokens.advance();
        count += 1;
    }
    count
}

/// Span from the start of `first` to the end of the last consumed token.
pub(in crate::interpreter::parser) fn span_from(first: &Span, tokens: &TokenStream<'_>) -> Span {
    Span::new(first.start.clone(), tokens.last_end())
}

/// Parses comma-separated expressions after an opening delimiter, up to and
/// including `closing`.
///
/// An immediate `closing` gives an empty list.
///
/// # Parameters
/// - `tokens`: Stream positioned after the opening delimiter.
/// - `closing`: `)` for calls, `]` for list literals.
/// - `first_message`: Reported when the first element cannot start.
/// - `close_message`: Reported when neither `,` nor `closing` follows an
///   element.
pub(in crate::interpreter::parser) fn parse_separated(tokens: &mut TokenStream<'_>,
                                                      closing: &TokenKind,
                                                      first_message: &str,
                                                      close_message: &str)
                                                      -> ParseResult<Vec<Node>> {
    let mut items = Vec::new();
    if tokens.peek().matches(closing) {
        tokens.advance();
        return Ok(items);
    }

    let start = tokens.position();
    let first = parse_expression(tokens);
    items.push(with_expectation(tokens, start, first, first_message)?);

    while tokens.peek().matches(&TokenKind::Comma) {
        tokens.advance();
        items.push(parse_expression(tokens)?);
    }

    expect(tokens, closing, close_message)?;
    Ok(items)
}
