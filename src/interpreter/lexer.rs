use std::{fmt, rc::Rc};

use logos::{Lexer, Logos};

use crate::{
    diagnostics::{Position, Source, Span},
    error::{SyntaxError, SyntaxErrorKind},
};

/// The kind of a lexical token, with its literal value where it has one.
///
/// Keywords are lexed as identifiers first and reclassified by [`tokenize`];
/// `Eof` is appended by [`tokenize`] as well. Neither is produced by the
/// derived lexer directly.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r]+")]
pub enum TokenKind {
    /// Integer literal such as `42`. Stored as `f64` because every runtime
    /// number is a double.
    #[regex(r"[0-9]+", parse_number)]
    Int(f64),
    /// Float literal such as `3.14` or `2.`. At most one `.` is accepted, so
    /// `1.2.3` lexes as `1.2` followed by an illegal `.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_number)]
    Float(f64),
    /// String literal with its escapes already resolved.
    #[token("\"", lex_string)]
    String(String),
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    Keyword(Keyword),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Mul,
    /// `/`
    #[token("/")]
    Div,
    /// `^`
    #[token("^")]
    Pow,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LSquare,
    /// `]`
    #[token("]")]
    RSquare,
    /// `=`
    #[token("=")]
    Eq,
    /// `==`
    #[token("==")]
    EqEq,
    /// `!=`
    #[token("!=")]
    NotEq,
    /// `<`
    #[token("<")]
    Lt,
    /// `>`
    #[token(">")]
    Gt,
    /// `<=`
    #[token("<=")]
    LtEq,
    /// `>=`
    #[token(">=")]
    GtEq,
    /// `,`
    #[token(",")]
    Comma,
    /// `->`
    #[token("->")]
    Arrow,
    /// A `!` that is not part of `!=`. Always rejected by [`tokenize`].
    #[token("!")]
    Bang,
    /// Statement separator: a line break or `;`.
    #[token("\n")]
    #[token(";")]
    Newline,
    Eof,
}

/// The fixed keyword set.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Keyword {
    Var,
    And,
    Or,
    Not,
    If,
    Then,
    Elif,
    Else,
    For,
    To,
    Step,
    While,
    Function,
    Return,
    Continue,
    Break,
    End,
}

impl Keyword {
    /// Returns the keyword spelled by `ident`, if any.
    pub fn from_identifier(ident: &str) -> Option<Self> {
        Some(match ident {
            "var" => Self::Var,
            "and" => Self::And,
            "or" => Self::Or,
            "not" => Self::Not,
            "if" => Self::If,
            "then" => Self::Then,
            "elif" => Self::Elif,
            "else" => Self::Else,
            "for" => Self::For,
            "to" => Self::To,
            "step" => Self::Step,
            "while" => Self::While,
            "function" => Self::Function,
            "return" => Self::Return,
            "continue" => Self::Continue,
            "break" => Self::Break,
            "end" => Self::End,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::If => "if",
            Self::Then => "then",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::For => "for",
            Self::To => "to",
            Self::Step => "step",
            Self::While => "while",
            Self::Function => "function",
            Self::Return => "return",
            Self::Continue => "continue",
            Self::Break => "break",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified token and the source range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Tests the token's kind, including its literal value.
    pub fn matches(&self, kind: &TokenKind) -> bool {
        &self.kind == kind
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

fn parse_number(lex: &Lexer<TokenKind>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Consumes a string literal after its opening quote.
///
/// `\n` and `\t` are translated; any other escaped character is taken
/// literally. A literal without a closing quote runs to the end of input.
fn lex_string(lex: &mut Lexer<TokenKind>) -> String {
    let mut text = String::new();
    let mut escaped = false;
    let mut consumed = 0;

    for ch in lex.remainder().chars() {
        consumed += ch.len_utf8();
        if escaped {
            text.push(match ch {
                          'n' => '\n',
                          't' => '\t',
                          other => other,
                      });
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            break;
        } else {
            text.push(ch);
        }
    }

    lex.bump(consumed);
    text
}

/// Moves `cursor` forward over the source text up to byte `offset`.
fn advance_to(cursor: &mut Position, text: &str, offset: usize) {
    for ch in text[cursor.offset..offset].chars() {
        cursor.advance(ch);
    }
}

/// Converts source text into a token sequence terminated by `Eof`.
///
/// # Errors
/// - `IllegalCharacter` for a character that cannot start a token.
/// - `ExpectedCharacter` for a `!` that is not followed by `=`.
///
/// # Example
/// ```
/// use basic::{
///     diagnostics::Source,
///     interpreter::lexer::{Keyword, TokenKind, tokenize},
/// };
///
/// let tokens = tokenize(&Source::new("<test>", "var a = 1.5")).unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Keyword(Keyword::Var),
///                 TokenKind::Identifier("a".to_string()),
///                 TokenKind::Eq,
///                 TokenKind::Float(1.5),
///                 TokenKind::Eof]);
/// ```
pub fn tokenize(source: &Rc<Source>) -> Result<Vec<Token>, SyntaxError> {
    let text = source.text.as_str();
    let mut lexer = TokenKind::lexer(text);
    let mut cursor = Position::start(Rc::clone(source));
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        advance_to(&mut cursor, text, range.start);
        let start = cursor.clone();

        match result {
            Ok(TokenKind::Bang) => {
                let span = Span::new(start.clone(), start.next_column());
                return Err(SyntaxError::new(SyntaxErrorKind::ExpectedCharacter { expected: '=',
                                                                                 after:    '!', },
                                            span));
            },
            Ok(TokenKind::Newline) => {
                let end = start.next_column();
                tokens.push(Token { kind: TokenKind::Newline,
                                    span: Span::new(start, end), });
            },
            Ok(TokenKind::Identifier(name)) => {
                advance_to(&mut cursor, text, range.end);
                let kind = Keyword::from_identifier(&name).map_or(TokenKind::Identifier(name),
                                                                   TokenKind::Keyword);
                tokens.push(Token { kind,
                                    span: Span::new(start, cursor.clone()) });
            },
            Ok(kind) => {
                advance_to(&mut cursor, text, range.end);
                tokens.push(Token { kind,
                                    span: Span::new(start, cursor.clone()) });
            },
            Err(()) => {
                let ch = text[range.start..].chars().next().unwrap_or_default();
                let span = Span::new(start.clone(), start.next_column());
                return Err(SyntaxError::new(SyntaxErrorKind::IllegalCharacter(ch), span));
            },
        }
    }

    advance_to(&mut cursor, text, text.len());
    let end = cursor.next_column();
    tokens.push(Token { kind: TokenKind::Eof,
                        span: Span::new(cursor, end), });

    Ok(tokens)
}
