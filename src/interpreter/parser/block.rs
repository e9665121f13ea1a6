use std::rc::Rc;

use crate::{
    ast::{Branch, IfCase, Node},
    interpreter::{
        lexer::{Keyword, TokenKind},
        parser::{
            binary::parse_expression,
            core::{ParseResult, TokenStream},
            statement::{parse_statement, parse_statements},
            utils::{error_here, expect, expect_identifier, expect_keyword, span_from},
        },
    },
};

type IfArms = (Vec<IfCase>, Option<Branch>);

/// Parses an `if` expression with its `elif` and `else` arms.
///
/// Syntax:
/// ```text
///     if <cond> then <statement> (elif ...)? (else <statement>)?
///
///     if <cond> then
///         <statements>
///     elif <cond> then
///         <statements>
///     else
///         <statements>
///     end
/// ```
/// A single-line arm yields its value; a multi-line arm yields null. Both
/// forms can be mixed within one chain.
///
/// # Errors
/// - `Expected 'then'` after a condition.
/// - `Expected 'end'` when a multi-line chain is not closed.
pub fn parse_if(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let first = tokens.peek();
    let (cases, else_branch) = parse_if_arms(tokens, Keyword::If)?;

    Ok(Node::If { cases,
                  else_branch: else_branch.map(Box::new),
                  span: span_from(&first.span, tokens) })
}

/// Parses one `if`/`elif` arm and everything chained after it.
fn parse_if_arms(tokens: &mut TokenStream<'_>, keyword: Keyword) -> ParseResult<IfArms> {
    expect_keyword(tokens, keyword)?;
    let condition = parse_expression(tokens)?;
    expect_keyword(tokens, Keyword::Then)?;

    let mut cases = Vec::new();

    if tokens.peek().matches(&TokenKind::Newline) {
        tokens.advance();
        let body = parse_statements(tokens)?;
        cases.push(IfCase { condition,
                            body,
                            suppress_value: true });

        if tokens.peek().is_keyword(Keyword::End) {
            tokens.advance();
            return Ok((cases, None));
        }
        if !tokens.peek().is_keyword(Keyword::Elif) && !tokens.peek().is_keyword(Keyword::Else) {
            return Err(error_here(tokens, "Expected 'end', 'elif' or 'else'"));
        }
    } else {
        let body = parse_statement(tokens)?;
        cases.push(IfCase { condition,
                            body,
                            suppress_value: false });
    }

    let (more, else_branch) = parse_elif_or_else(tokens)?;
    cases.extend(more);
    Ok((cases, else_branch))
}

fn parse_elif_or_else(tokens: &mut TokenStream<'_>) -> ParseResult<IfArms> {
    if tokens.peek().is_keyword(Keyword::Elif) {
        parse_if_arms(tokens, Keyword::Elif)
    } else {
        Ok((Vec::new(), parse_else(tokens)?))
    }
}

fn parse_else(tokens: &mut TokenStream<'_>) -> ParseResult<Option<Branch>> {
    if !tokens.peek().is_keyword(Keyword::Else) {
        return Ok(None);
    }
    tokens.advance();

    let (body, suppress_value) = parse_body(tokens)?;
    Ok(Some(Branch { body, suppress_value }))
}

/// Parses the body after `then` (or `else`): either one statement on the
/// same line, or a newline, a statement list and `end`.
///
/// # Returns
/// The body and whether it is the multi-line form.
fn parse_body(tokens: &mut TokenStream<'_>) -> ParseResult<(Node, bool)> {
    if tokens.peek().matches(&TokenKind::Newline) {
        tokens.advance();
        let body = parse_statements(tokens)?;
        expect_keyword(tokens, Keyword::End)?;
        Ok((body, true))
    } else {
        Ok((parse_statement(tokens)?, false))
    }
}

/// Parses a counted loop.
///
/// Syntax: `for <name> = <start> to <end> (step <step>)? then <body>`
///
/// A single-line body makes the loop yield the list of iteration values; the
/// multi-line form yields null.
pub fn parse_for(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let first = expect_keyword(tokens, Keyword::For)?;
    let var_name = expect_identifier(tokens, "Expected identifier")?;
    expect(tokens, &TokenKind::Eq, "Expected '='")?;
    let start = parse_expression(tokens)?;

    expect_keyword(tokens, Keyword::To)?;
    let end = parse_expression(tokens)?;

    let step = if tokens.peek().is_keyword(Keyword::Step) {
        tokens.advance();
        Some(Box::new(parse_expression(tokens)?))
    } else {
        None
    };

    expect_keyword(tokens, Keyword::Then)?;
    let (body, suppress_value) = parse_body(tokens)?;

    Ok(Node::For { var_name,
                   start: Box::new(start),
                   end: Box::new(end),
                   step,
                   body: Box::new(body),
                   suppress_value,
                   span: span_from(&first.span, tokens) })
}

/// Parses a conditional loop.
///
/// Syntax: `while <cond> then <body>`, with the same body forms as `for`.
pub fn parse_while(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let first = expect_keyword(tokens, Keyword::While)?;
    let condition = parse_expression(tokens)?;

    expect_keyword(tokens, Keyword::Then)?;
    let (body, suppress_value) = parse_body(tokens)?;

    Ok(Node::While { condition: Box::new(condition),
                     body: Box::new(body),
                     suppress_value,
                     span: span_from(&first.span, tokens) })
}

/// Parses a function definition.
///
/// Syntax:
/// ```text
///     function <name>?(<param>, ...) -> <expr>
///
///     function <name>?(<param>, ...)
///         <statements>
///     end
/// ```
/// The arrow form returns its expression; the block form returns whatever an
/// explicit `return` delivers.
pub fn parse_function(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let first = expect_keyword(tokens, Keyword::Function)?;

    let name = match &tokens.peek().kind {
        TokenKind::Identifier(name) => {
            tokens.advance();
            expect(tokens, &TokenKind::LParen, "Expected '('")?;
            Some(name.clone())
        },
        _ => {
            expect(tokens, &TokenKind::LParen, "Expected identifier or '('")?;
            None
        },
    };

    let mut params = Vec::new();
    if let TokenKind::Identifier(param) = &tokens.peek().kind {
        tokens.advance();
        params.push(param.clone());

        while tokens.peek().matches(&TokenKind::Comma) {
            tokens.advance();
            params.push(expect_identifier(tokens, "Expected identifier")?);
        }
        expect(tokens, &TokenKind::RParen, "Expected ',' or ')'")?;
    } else {
        expect(tokens, &TokenKind::RParen, "Expected identifier or ')'")?;
    }

    let (body, expression_body) = if tokens.peek().matches(&TokenKind::Arrow) {
        tokens.advance();
        (parse_expression(tokens)?, true)
    } else {
        expect(tokens, &TokenKind::Newline, "Expected '->' or NEWLINE")?;
        let body = parse_statements(tokens)?;
        expect_keyword(tokens, Keyword::End)?;
        (body, false)
    };

    Ok(Node::FuncDef { name,
                       params,
                       body: Rc::new(body),
                       expression_body,
                       span: span_from(&first.span, tokens) })
}
