use basic::{
    ast::{BinaryOperator, Node, UnaryOperator},
    diagnostics::Source,
    error::SyntaxError,
    interpreter::{lexer::tokenize, parser::core::parse},
};

fn parse_source(text: &str) -> Result<Node, SyntaxError> {
    let tokens = tokenize(&Source::new("<test>", text)).unwrap_or_else(|e| panic!("Lexing failed:\n{e}"));
    parse(&tokens)
}

/// Parses a program and returns its statements.
fn statements(text: &str) -> Vec<Node> {
    match parse_source(text) {
        Ok(Node::ListLiteral { elements, .. }) => elements,
        Ok(other) => panic!("program root is not a statement list: {other:?}"),
        Err(e) => panic!("Parsing failed:\n{e}"),
    }
}

fn single(text: &str) -> Node {
    let mut nodes = statements(text);
    assert_eq!(nodes.len(), 1, "expected one statement in {text:?}");
    nodes.remove(0)
}

fn assert_syntax_error(text: &str, message: &str) {
    match parse_source(text) {
        Ok(node) => panic!("{text:?} parsed as {node:?} but was expected to fail"),
        Err(e) => assert!(e.to_string().contains(message), "expected {message:?} in:\n{e}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let Node::BinaryOp { op, right, .. } = single("1 + 2 * 3") else {
        panic!("expected a binary operation");
    };
    assert_eq!(op, BinaryOperator::Add);
    assert!(matches!(*right, Node::BinaryOp { op: BinaryOperator::Mul, .. }));
}

#[test]
fn power_is_right_associative() {
    let Node::BinaryOp { op, left, right, .. } = single("2 ^ 3 ^ 2") else {
        panic!("expected a binary operation");
    };
    assert_eq!(op, BinaryOperator::Pow);
    assert!(matches!(*left, Node::NumberLiteral { value, .. } if value == 2.0));
    assert!(matches!(*right, Node::BinaryOp { op: BinaryOperator::Pow, .. }));
}

#[test]
fn sign_wraps_power() {
    let Node::UnaryOp { op, operand, .. } = single("-2 ^ 2") else {
        panic!("expected a unary operation");
    };
    assert_eq!(op, UnaryOperator::Minus);
    assert!(matches!(*operand, Node::BinaryOp { op: BinaryOperator::Pow, .. }));
}

#[test]
fn logic_binds_loosest() {
    let Node::BinaryOp { op, left, .. } = single("not 1 == 2 and 3 < 4") else {
        panic!("expected a binary operation");
    };
    assert_eq!(op, BinaryOperator::And);
    assert!(matches!(*left, Node::UnaryOp { op: UnaryOperator::Not, .. }));
}

#[test]
fn assignment_chains() {
    let Node::VarAssign { name, value, span } = single("var a = var b = 1") else {
        panic!("expected an assignment");
    };
    assert_eq!(name, "a");
    assert!(matches!(*value, Node::VarAssign { ref name, .. } if name == "b"));
    assert_eq!((span.start.col, span.end.col), (0, 17));
}

#[test]
fn node_spans_cover_their_tokens() {
    let node = single("  foo(1, [2])");
    let span = node.span();
    assert_eq!((span.start.col, span.end.col), (2, 13));

    let Node::Call { args, .. } = node else {
        panic!("expected a call");
    };
    assert_eq!(args.len(), 2);
    assert_eq!((args[1].span().start.col, args[1].span().end.col), (9, 12));
}

#[test]
fn blank_lines_between_statements() {
    assert_eq!(statements("\n\n1\n\n;2;\n").len(), 2);
}

#[test]
fn if_forms() {
    let Node::If { cases, else_branch, .. } = single("if 1 then 2 elif 3 then 4 else 5") else {
        panic!("expected an if");
    };
    assert_eq!(cases.len(), 2);
    assert!(!cases[0].suppress_value);
    assert!(else_branch.is_some_and(|branch| !branch.suppress_value));

    let Node::If { cases, else_branch, .. } = single("if 1 then\n  2\n  3\nelse\n  4\nend") else {
        panic!("expected an if");
    };
    assert!(cases[0].suppress_value);
    assert!(matches!(&cases[0].body, Node::ListLiteral { elements, .. } if elements.len() == 2));
    assert!(else_branch.is_some_and(|branch| branch.suppress_value));
}

#[test]
fn loops_and_functions() {
    assert!(matches!(single("for i = 0 to 10 step 2 then i"),
                     Node::For { step: Some(_), suppress_value: false, .. }));
    assert!(matches!(single("while 1 then\n  break\nend"),
                     Node::While { suppress_value: true, .. }));

    let Node::FuncDef { name, params, expression_body, .. } = single("function add(a, b) -> a + b") else {
        panic!("expected a function definition");
    };
    assert_eq!(name.as_deref(), Some("add"));
    assert_eq!(params, vec!["a".to_string(), "b".to_string()]);
    assert!(expression_body);

    assert!(matches!(single("function()\n  return\nend"),
                     Node::FuncDef { name: None, expression_body: false, .. }));
}

#[test]
fn return_value_is_optional() {
    let Node::FuncDef { body, .. } = single("function f()\n  return\n  return 1\nend") else {
        panic!("expected a function definition");
    };
    let Node::ListLiteral { elements, .. } = body.as_ref() else {
        panic!("expected a statement list");
    };
    assert!(matches!(&elements[0], Node::Return { value: None, .. }));
    assert!(matches!(&elements[1], Node::Return { value: Some(_), .. }));
}

#[test]
fn missing_tokens_are_named() {
    assert_syntax_error("var = 1", "Expected identifier");
    assert_syntax_error("var a 1", "Expected '='");
    assert_syntax_error("if 1 2", "Expected 'then'");
    assert_syntax_error("if 1 then\n2", "Expected 'end', 'elif' or 'else'");
    assert_syntax_error("for i = 0 to 3 then\n  i", "Expected 'end'");
    assert_syntax_error("for = 0 to 3 then i", "Expected identifier");
    assert_syntax_error("[1, 2", "Expected ',' or ']'");
    assert_syntax_error("f(1", "Expected ',' or ')'");
    assert_syntax_error("(1 + 2", "Expected ')'");
    assert_syntax_error("function (a b) -> 1", "Expected ',' or ')'");
    assert_syntax_error("function f() 1", "Expected '->' or NEWLINE");
}

#[test]
fn unstartable_rules_list_alternatives() {
    assert_syntax_error(")",
                        "Expected 'return', 'continue', 'break', 'var', 'if', 'for', 'while', \
                         'function', int, float, identifier, '+', '-', '(', '[' or 'not'");
    assert_syntax_error("f(",
                        "Expected ')', 'var', 'if', 'for', 'while', 'function', int, float, \
                         identifier, '+', '-', '(', '[' or 'not'");
    assert_syntax_error("f(1, )",
                        "Expected 'var', 'if', 'for', 'while', 'function', int, float, \
                         identifier, '+', '-', '(', '[' or 'not'");
    assert_syntax_error("1 2",
                        "Expected '+', '-', '*', '/', '^', '==', '!=', '<', '>', '<=', '>=', \
                         'and' or 'or'");
}

#[test]
fn failure_inside_later_statement_is_reported() {
    assert_syntax_error("1\nvar", "Expected identifier");
}

#[test]
fn syntax_error_renders_location() {
    let error = parse_source("1 +").unwrap_err();
    assert_eq!(error.to_string(),
               "Invalid Syntax: Expected int, float, identifier, '+', '-', '(', '[', 'if', \
                'for', 'while' or 'function'\nFile <test>, line 1\n\n1 +\n   ^");
}
