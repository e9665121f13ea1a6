use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    interpreter::{
        lexer::{Keyword, Token, TokenKind},
        parser::{
            core::{ParseResult, TokenStream},
            unary::parse_factor,
            utils::{
                COMPARISON_EXPECTED, EXPRESSION_EXPECTED, expect, expect_identifier, span_from,
                with_expectation,
            },
        },
    },
};

type ParseFn<'a> = fn(&mut TokenStream<'a>) -> ParseResult<Node>;

/// Parses a left-associative chain `operand (op operand)*`.
///
/// `operator` decides whether the current token continues the chain. The
/// right-hand side is parsed with `right`, which lets exponentiation recurse
/// into a higher level for right associativity.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `left`: Parser for the first operand.
/// - `operator`: Maps a token to the operator it spells at this level.
/// - `right`: Parser for every following operand.
///
/// # Returns
/// The operand itself, or a tree of `Node::BinaryOp`.
pub(in crate::interpreter::parser) fn parse_binary<'a>(tokens: &mut TokenStream<'a>,
                                                       left: ParseFn<'a>,
                                                       operator: fn(&Token)
                                                                   -> Option<BinaryOperator>,
                                                       right: ParseFn<'a>)
                                                       -> ParseResult<Node> {
    let mut node = left(tokens)?;

    while let Some(op) = operator(tokens.peek()) {
        let op_span = tokens.advance().span.clone();
        let rhs = right(tokens)?;
        let span = node.span().to(rhs.span());
        node = Node::BinaryOp { left: Box::new(node),
                                op,
                                op_span,
                                right: Box::new(rhs),
                                span };
    }

    Ok(node)
}

/// Parses an expression, the lowest precedence level.
///
/// Grammar:
/// ```text
/// expr := 'var' IDENTIFIER '=' expr
///       | comp_expr (('and' | 'or') comp_expr)*
/// ```
///
/// Assignment is itself an expression, so `var a = var b = 1` binds both.
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let first = tokens.peek();

    if first.is_keyword(Keyword::Var) {
        tokens.advance();
        let name = expect_identifier(tokens, "Expected identifier")?;
        expect(tokens, &TokenKind::Eq, "Expected '='")?;
        let value = parse_expression(tokens)?;

        return Ok(Node::VarAssign { name,
                                    value: Box::new(value),
                                    span: span_from(&first.span, tokens) });
    }

    let start = tokens.position();
    let result = parse_binary(tokens, parse_comparison, logic_operator, parse_comparison);
    with_expectation(tokens, start, result, EXPRESSION_EXPECTED)
}

/// Parses a comparison or a `not` prefix.
///
/// Grammar: `comp_expr := 'not' comp_expr | arith_expr (cmp arith_expr)*`
pub fn parse_comparison(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let first = tokens.peek();

    if first.is_keyword(Keyword::Not) {
        tokens.advance();
        let operand = parse_comparison(tokens)?;
        let span = first.span.to(operand.span());

        return Ok(Node::UnaryOp { op: UnaryOperator::Not,
                                  op_span: first.span.clone(),
                                  operand: Box::new(operand),
                                  span });
    }

    let start = tokens.position();
    let result = parse_binary(tokens, parse_arithmetic, comparison_operator, parse_arithmetic);
    with_expectation(tokens, start, result, COMPARISON_EXPECTED)
}

/// Grammar: `arith_expr := term (('+' | '-') term)*`
pub fn parse_arithmetic(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_binary(tokens, parse_term, additive_operator, parse_term)
}

/// Grammar: `term := factor (('*' | '/') factor)*`
pub fn parse_term(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_binary(tokens, parse_factor, multiplicative_operator, parse_factor)
}

fn logic_operator(token: &Token) -> Option<BinaryOperator> {
    match token.kind {
        TokenKind::Keyword(Keyword::And) => Some(BinaryOperator::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOperator::Or),
        _ => None,
    }
}

fn comparison_operator(token: &Token) -> Option<BinaryOperator> {
    match token.kind {
        TokenKind::EqEq => Some(BinaryOperator::Equal),
        TokenKind::NotEq => Some(BinaryOperator::NotEqual),
        TokenKind::Lt => Some(BinaryOperator::Less),
        TokenKind::Gt => Some(BinaryOperator::Greater),
        TokenKind::LtEq => Some(BinaryOperator::LessEqual),
        TokenKind::GtEq => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

fn additive_operator(token: &Token) -> Option<BinaryOperator> {
    match token.kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        _ => None,
    }
}

fn multiplicative_operator(token: &Token) -> Option<BinaryOperator> {
    match token.kind {
        TokenKind::Mul => Some(BinaryOperator::Mul),
        TokenKind::Div => Some(BinaryOperator::Div),
        _ => None,
    }
}

pub(in crate::interpreter::parser) fn power_operator(token: &Token) -> Option<BinaryOperator> {
    matches!(token.kind, TokenKind::Pow).then_some(BinaryOperator::Pow)
}
