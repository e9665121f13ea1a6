use crate::{
    ast::Node,
    diagnostics::Span,
    interpreter::{
        lexer::Keyword,
        parser::{
            binary::parse_expression,
            core::{ParseResult, TokenStream, attempt},
            utils::{STATEMENT_EXPECTED, skip_newlines, span_from, with_expectation},
        },
    },
};

/// Parses a statement list.
///
/// Grammar: `statements := NEWLINE* statement (NEWLINE+ statement)*`
///
/// Every statement after the first is attempted speculatively: a list may
/// legitimately stop before `end`, `elif`, `else` or the end of input, so a
/// statement that cannot even start ends the list instead of failing.
///
/// # Returns
/// A `Node::ListLiteral` whose elements are the statements.
///
/// # Errors
/// Fails if the first statement is missing, or if a later one fails after
/// consuming tokens.
pub fn parse_statements(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    skip_newlines(tokens);
    let start = tokens.peek().span.start.clone();

    let mut statements = vec![parse_statement(tokens)?];

    while skip_newlines(tokens) > 0 {
        match attempt(tokens, parse_statement)? {
            Some(statement) => statements.push(statement),
            None => break,
        }
    }

    Ok(Node::ListLiteral { elements: statements,
                           span:     Span::new(start, tokens.last_end()), })
}

/// Parses one statement.
///
/// Grammar: `statement := 'return' expr? | 'continue' | 'break' | expr`
pub fn parse_statement(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let first = tokens.peek();

    if first.is_keyword(Keyword::Return) {
        tokens.advance();
        let value = attempt(tokens, parse_expression)?;
        return Ok(Node::Return { value: value.map(Box::new),
                                 span:  span_from(&first.span, tokens), });
    }
    if first.is_keyword(Keyword::Continue) {
        tokens.advance();
        return Ok(Node::Continue { span: first.span.clone() });
    }
    if first.is_keyword(Keyword::Break) {
        tokens.advance();
        return Ok(Node::Break { span: first.span.clone() });
    }

    let start = tokens.position();
    let result = parse_expression(tokens);
    with_expectation(tokens, start, result, STATEMENT_EXPECTED)
}
