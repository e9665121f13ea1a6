use std::rc::Rc;

use crate::diagnostics::Span;

/// A node of the syntax tree.
///
/// Every variant carries the span of its full source range, from the first
/// token it was parsed from to the last.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `42`, `3.5`
    NumberLiteral { value: f64, span: Span },
    /// `"text"`
    StringLiteral { value: String, span: Span },
    /// `[a, b, c]`. Statement sequences (the program root and block bodies)
    /// are represented the same way and evaluate to the list of their
    /// statement values.
    ListLiteral { elements: Vec<Self>, span: Span },
    /// `name`
    VarAccess { name: String, span: Span },
    /// `var name = value`
    VarAssign {
        name:  String,
        value: Box<Self>,
        span:  Span,
    },
    /// `left op right`. `op_span` is the operator token, which is what the
    /// result value is attributed to.
    BinaryOp {
        left:    Box<Self>,
        op:      BinaryOperator,
        op_span: Span,
        right:   Box<Self>,
        span:    Span,
    },
    /// `op operand`
    UnaryOp {
        op:      UnaryOperator,
        op_span: Span,
        operand: Box<Self>,
        span:    Span,
    },
    /// `if ... then ... elif ... else ...`
    If {
        cases:       Vec<IfCase>,
        else_branch: Option<Box<Branch>>,
        span:        Span,
    },
    /// `for name = start to end (step s)? then body`
    For {
        var_name:       String,
        start:          Box<Self>,
        end:            Box<Self>,
        step:           Option<Box<Self>>,
        body:           Box<Self>,
        suppress_value: bool,
        span:           Span,
    },
    /// `while condition then body`
    While {
        condition:      Box<Self>,
        body:           Box<Self>,
        suppress_value: bool,
        span:           Span,
    },
    /// `function name(params) -> expr` or the block form ending in `end`.
    ///
    /// The body is shared because function values outlive the tree they were
    /// defined in.
    FuncDef {
        name:            Option<String>,
        params:          Vec<String>,
        body:            Rc<Self>,
        expression_body: bool,
        span:            Span,
    },
    /// `callee(args)`
    Call {
        callee: Box<Self>,
        args:   Vec<Self>,
        span:   Span,
    },
    /// `return value?`
    Return {
        value: Option<Box<Self>>,
        span:  Span,
    },
    Continue { span: Span },
    Break { span: Span },
}

/// One `if`/`elif` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct IfCase {
    pub condition:      Node,
    pub body:           Node,
    /// Set for the multi-line form, which yields null instead of its value.
    pub suppress_value: bool,
}

/// The `else` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub body:           Node,
    pub suppress_value: bool,
}

impl Node {
    pub const fn span(&self) -> &Span {
        match self {
            Self::NumberLiteral { span, .. }
            | Self::StringLiteral { span, .. }
            | Self::ListLiteral { span, .. }
            | Self::VarAccess { span, .. }
            | Self::VarAssign { span, .. }
            | Self::BinaryOp { span, .. }
            | Self::UnaryOp { span, .. }
            | Self::If { span, .. }
            | Self::For { span, .. }
            | Self::While { span, .. }
            | Self::FuncDef { span, .. }
            | Self::Call { span, .. }
            | Self::Return { span, .. }
            | Self::Continue { span }
            | Self::Break { span } => span,
        }
    }
}

/// Binary operators, from arithmetic to logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOperator {
    /// The source spelling, used in error messages.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
}
