use crate::{
    ast::{Node, UnaryOperator},
    interpreter::{
        lexer::{Keyword, TokenKind},
        parser::{
            binary::{parse_binary, parse_expression, power_operator},
            block::{parse_for, parse_function, parse_if, parse_while},
            core::{ParseResult, TokenStream},
            utils::{
                ARGUMENT_EXPECTED, ATOM_EXPECTED, ELEMENT_EXPECTED, error_here, expect,
                parse_separated, span_from,
            },
        },
    },
};

/// Parses a signed factor.
///
/// Grammar: `factor := ('+' | '-') factor | power`
///
/// Because the sign wraps a whole `power`, `-2 ^ 2` is `-(2 ^ 2)`.
pub fn parse_factor(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let first = tokens.peek();
    let op = match first.kind {
        TokenKind::Plus => UnaryOperator::Plus,
        TokenKind::Minus => UnaryOperator::Minus,
        _ => return parse_power(tokens),
    };

    tokens.advance();
    let operand = parse_factor(tokens)?;
    let span = first.span.to(operand.span());

    Ok(Node::UnaryOp { op,
                       op_span: first.span.clone(),
                       operand: Box::new(operand),
                       span })
}

/// Grammar: `power := call ('^' factor)*`
///
/// The right operand recurses through `factor`, making `^` right
/// associative.
pub fn parse_power(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_binary(tokens, parse_call, power_operator, parse_factor)
}

/// Parses an atom optionally followed by an argument list.
///
/// Grammar: `call := atom ('(' (expr (',' expr)*)? ')')?`
pub fn parse_call(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let callee = parse_atom(tokens)?;

    if !tokens.peek().matches(&TokenKind::LParen) {
        return Ok(callee);
    }
    tokens.advance();

    let args = parse_separated(tokens, &TokenKind::RParen, ARGUMENT_EXPECTED, "Expected ',' or ')'")?;
    let span = span_from(callee.span(), tokens);

    Ok(Node::Call { callee: Box::new(callee),
                    args,
                    span })
}

/// Parses the highest-precedence forms.
///
/// Grammar:
/// ```text
/// atom := INT | FLOAT | STRING | IDENTIFIER
///       | '(' expr ')'
///       | list
///       | if_expr | for_expr | while_expr | func_def
/// ```
pub fn parse_atom(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let token = tokens.peek();

    match &token.kind {
        TokenKind::Int(value) | TokenKind::Float(value) => {
            tokens.advance();
            Ok(Node::NumberLiteral { value: *value,
                                     span:  token.span.clone(), })
        },
        TokenKind::String(value) => {
            tokens.advance();
            Ok(Node::StringLiteral { value: value.clone(),
                                     span:  token.span.clone(), })
        },
        TokenKind::Identifier(name) => {
            tokens.advance();
            Ok(Node::VarAccess { name: name.clone(),
                                 span: token.span.clone(), })
        },
        TokenKind::LParen => {
            tokens.advance();
            let expr = parse_expression(tokens)?;
            expect(tokens, &TokenKind::RParen, "Expected ')'")?;
            Ok(expr)
        },
        TokenKind::LSquare => parse_list(tokens),
        TokenKind::Keyword(Keyword::If) => parse_if(tokens),
        TokenKind::Keyword(Keyword::For) => parse_for(tokens),
        TokenKind::Keyword(Keyword::While) => parse_while(tokens),
        TokenKind::Keyword(Keyword::Function) => parse_function(tokens),
        _ => Err(error_here(tokens, ATOM_EXPECTED)),
    }
}

/// Grammar: `list := '[' (expr (',' expr)*)? ']'`
pub fn parse_list(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let open = expect(tokens, &TokenKind::LSquare, "Expected '['")?;
    let elements = parse_separated(tokens, &TokenKind::RSquare, ELEMENT_EXPECTED, "Expected ',' or ']'")?;

    Ok(Node::ListLiteral { elements,
                           span: span_from(&open.span, tokens) })
}
