use std::{cell::RefCell, f64::consts::PI, fmt, rc::Rc};

use crate::{
    diagnostics::Span,
    interpreter::{
        environment::Context, evaluator::function::core::BuiltinDef,
        value::function::UserFunction,
    },
};

/// The payload of a runtime value.
#[derive(Clone)]
pub enum Data {
    Number(f64),
    String(String),
    /// Lists are shared, so builtins like `append` mutate in place and the
    /// change is visible through every binding of the list.
    List(Rc<RefCell<Vec<Value>>>),
    Function(Rc<UserFunction>),
    Builtin(&'static BuiltinDef),
}

/// A runtime value together with where it came from.
///
/// `span` and `context` are provenance: they point at the source range that
/// produced the value and the context it was produced in, and are used to
/// attribute errors. They never take part in equality or printing.
#[derive(Clone)]
pub struct Value {
    pub data:    Data,
    pub span:    Option<Span>,
    pub context: Option<Rc<Context>>,
}

impl Value {
    pub const fn new(data: Data) -> Self {
        Self { data,
               span: None,
               context: None }
    }

    pub const fn number(value: f64) -> Self {
        Self::new(Data::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Data::String(value.into()))
    }

    pub fn list(elements: Vec<Self>) -> Self {
        Self::new(Data::List(Rc::new(RefCell::new(elements))))
    }

    /// The "no value" sentinel, the number `0`.
    pub const fn null() -> Self {
        Self::number(0.0)
    }

    /// `1` for true, `0` for false.
    pub const fn from_bool(value: bool) -> Self {
        Self::number(if value { 1.0 } else { 0.0 })
    }

    /// The constants every root scope starts with.
    pub fn constants() -> [(&'static str, Self); 4] {
        [("null", Self::null()),
         ("true", Self::from_bool(true)),
         ("false", Self::from_bool(false)),
         ("math_pi", Self::number(PI))]
    }

    /// Returns the same content without any provenance.
    ///
    /// List storage is shared with the original.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self::new(self.data.clone())
    }

    /// Returns a copy whose lists, at every depth, are new storage.
    #[must_use]
    pub fn detached(&self) -> Self {
        match &self.data {
            Data::List(elements) => Self::list(elements.borrow().iter().map(Self::detached).collect()),
            _ => self.copy(),
        }
    }

    /// Whether `storage` is this list or nested somewhere inside it.
    ///
    /// # Example
    /// ```
    /// use basic::interpreter::value::core::{Data, Value};
    ///
    /// let inner = Value::list(vec![]);
    /// let outer = Value::list(vec![inner.clone()]);
    /// let Data::List(storage) = &inner.data else { unreachable!() };
    ///
    /// assert!(outer.contains_list(storage));
    /// assert!(!outer.detached().contains_list(storage));
    /// ```
    pub fn contains_list(&self, storage: &Rc<RefCell<Vec<Self>>>) -> bool {
        match &self.data {
            Data::List(elements) => {
                Rc::ptr_eq(elements, storage)
                || elements.borrow().iter().any(|element| element.contains_list(storage))
            },
            _ => false,
        }
    }

    /// Attaches provenance, replacing any the value already had.
    #[must_use]
    pub fn with_provenance(mut self, span: Span, context: Rc<Context>) -> Self {
        self.span = Some(span);
        self.context = Some(context);
        self
    }

    /// The kind name used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self.data {
            Data::Number(_) => "Number",
            Data::String(_) => "String",
            Data::List(_) => "List",
            Data::Function(_) => "Function",
            Data::Builtin(_) => "BuiltInFunction",
        }
    }

    /// Truthiness: numbers are true when nonzero, strings when non-empty.
    ///
    /// Returns `None` for kinds without a truth value.
    ///
    /// # Example
    /// ```
    /// use basic::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::number(2.0).is_true(), Some(true));
    /// assert_eq!(Value::string("").is_true(), Some(false));
    /// assert_eq!(Value::list(vec![]).is_true(), None);
    /// ```
    pub fn is_true(&self) -> Option<bool> {
        match &self.data {
            Data::Number(n) => Some(*n != 0.0),
            Data::String(s) => Some(!s.is_empty()),
            _ => None,
        }
    }

    pub const fn is_function(&self) -> bool {
        matches!(self.data, Data::Function(_) | Data::Builtin(_))
    }

    /// The text a value prints as: strings raw, everything else as displayed.
    ///
    /// # Example
    /// ```
    /// use basic::interpreter::value::core::Value;
    ///
    /// let list = Value::list(vec![Value::number(1.0), Value::string("a")]);
    ///
    /// assert_eq!(Value::string("a").to_text(), "a");
    /// assert_eq!(list.to_text(), "[1, \"a\"]");
    /// ```
    pub fn to_text(&self) -> String {
        match &self.data {
            Data::String(s) => s.clone(),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Data::Number(n) => write!(f, "{n}"),
            Data::String(s) => write!(f, "\"{s}\""),
            Data::List(elements) => {
                write!(f, "[")?;

                for (index, value) in elements.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Data::Function(function) => write!(f, "<function {}>", function.display_name()),
            Data::Builtin(builtin) => write!(f, "<built-in function {}>", builtin.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({self})", self.kind_name())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (Data::Number(a), Data::Number(b)) => a == b,
            (Data::String(a), Data::String(b)) => a == b,
            (Data::List(a), Data::List(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Data::Function(a), Data::Function(b)) => Rc::ptr_eq(a, b),
            (Data::Builtin(a), Data::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}
