use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::RuntimeErrorKind,
    interpreter::value::core::{Data, Value},
    util::num::{repeat_count, resolve_index},
};

/// Largest string, in bytes, that repetition may produce.
pub const MAX_STRING_LEN: usize = 1 << 28;

/// Result of an operator. Results carry no provenance yet; the evaluator
/// stamps them with the operator's span.
pub type OpResult = Result<Value, RuntimeErrorKind>;

impl Value {
    /// Applies a binary operator with `self` as the left operand.
    ///
    /// # Example
    /// ```
    /// use basic::{ast::BinaryOperator, interpreter::value::core::Value};
    ///
    /// let list = Value::list(vec![1.0.into(), 2.0.into(), 3.0.into()]);
    ///
    /// assert_eq!(list.binary(BinaryOperator::Div, &Value::number(-1.0)),
    ///            Ok(Value::number(3.0)));
    /// assert_eq!(Value::from("ab").binary(BinaryOperator::Mul, &Value::number(2.0)),
    ///            Ok(Value::from("abab")));
    /// ```
    pub fn binary(&self, op: BinaryOperator, other: &Self) -> OpResult {
        match op {
            BinaryOperator::Add => self.add(other),
            BinaryOperator::Sub => self.sub(other),
            BinaryOperator::Mul => self.mul(other),
            BinaryOperator::Div => self.div(other),
            BinaryOperator::Pow => self.pow(other),
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::Less
            | BinaryOperator::Greater
            | BinaryOperator::LessEqual
            | BinaryOperator::GreaterEqual => self.compare(op, other),
            BinaryOperator::And | BinaryOperator::Or => self.logic(op, other),
        }
    }

    /// Applies a unary operator.
    ///
    /// `-x` is `x * -1`, so it works for every kind `*` works for. `+x` is the
    /// identity.
    pub fn unary(&self, op: UnaryOperator) -> OpResult {
        match op {
            UnaryOperator::Plus => Ok(self.copy()),
            UnaryOperator::Minus => self.mul(&Self::number(-1.0)),
            UnaryOperator::Not => match self.data {
                Data::Number(n) => Ok(Self::from_bool(n == 0.0)),
                _ => Err(self.undefined_keyword("not")),
            },
        }
    }

    /// `+`: number addition, string concatenation, or appending one value to a
    /// copy of a list.
    pub fn add(&self, other: &Self) -> OpResult {
        match (&self.data, &other.data) {
            (Data::Number(a), Data::Number(b)) => Ok(Self::number(a + b)),
            (Data::String(a), Data::String(b)) => Ok(Self::string(format!("{a}{b}"))),
            (Data::List(elements), _) => {
                let mut copy = elements.borrow().clone();
                copy.push(other.copy());
                Ok(Self::list(copy))
            },
            (Data::Number(_) | Data::String(_), _) => Err(self.incompatible(other)),
            _ => Err(self.undefined_operator(BinaryOperator::Add)),
        }
    }

    /// `-`: number subtraction, or removing the element at an index from a
    /// copy of a list.
    pub fn sub(&self, other: &Self) -> OpResult {
        match (&self.data, &other.data) {
            (Data::Number(a), Data::Number(b)) => Ok(Self::number(a - b)),
            (Data::List(elements), Data::Number(index)) => {
                let mut copy = elements.borrow().clone();
                let index = resolve_index(*index, copy.len()).ok_or(RuntimeErrorKind::IndexOutOfBounds { action: "removed" })?;
                copy.remove(index);
                Ok(Self::list(copy))
            },
            (Data::Number(_) | Data::List(_), _) => Err(self.incompatible(other)),
            _ => Err(self.undefined_operator(BinaryOperator::Sub)),
        }
    }

    /// `*`: number multiplication, string repetition, or list concatenation.
    pub fn mul(&self, other: &Self) -> OpResult {
        match (&self.data, &other.data) {
            (Data::Number(a), Data::Number(b)) => Ok(Self::number(a * b)),
            (Data::String(s), Data::Number(n)) => {
                let count = repeat_count(*n);
                match s.len().checked_mul(count) {
                    Some(0) => Ok(Self::string("")),
                    Some(len) if len <= MAX_STRING_LEN => Ok(Self::string(s.repeat(count))),
                    _ => Err(RuntimeErrorKind::StringTooLong),
                }
            },
            (Data::List(a), Data::List(b)) => {
                let mut copy = a.borrow().clone();
                copy.extend(b.borrow().iter().cloned());
                Ok(Self::list(copy))
            },
            (Data::Number(_) | Data::String(_) | Data::List(_), _) => Err(self.incompatible(other)),
            _ => Err(self.undefined_operator(BinaryOperator::Mul)),
        }
    }

    /// `/`: number division, or retrieving the element at an index of a list.
    pub fn div(&self, other: &Self) -> OpResult {
        match (&self.data, &other.data) {
            (Data::Number(_), Data::Number(b)) if *b == 0.0 => Err(RuntimeErrorKind::DivisionByZero),
            (Data::Number(a), Data::Number(b)) => Ok(Self::number(a / b)),
            (Data::List(elements), Data::Number(index)) => {
                let elements = elements.borrow();
                resolve_index(*index, elements.len()).map(|i| elements[i].clone())
                                                     .ok_or(RuntimeErrorKind::IndexOutOfBounds { action: "retrieved" })
            },
            (Data::Number(_) | Data::List(_), _) => Err(self.incompatible(other)),
            _ => Err(self.undefined_operator(BinaryOperator::Div)),
        }
    }

    /// `^`: number exponentiation.
    pub fn pow(&self, other: &Self) -> OpResult {
        match (&self.data, &other.data) {
            (Data::Number(a), Data::Number(b)) => Ok(Self::number(a.powf(*b))),
            (Data::Number(_), _) => Err(self.incompatible(other)),
            _ => Err(self.undefined_operator(BinaryOperator::Pow)),
        }
    }

    /// Comparisons between numbers, yielding `1` or `0`.
    fn compare(&self, op: BinaryOperator, other: &Self) -> OpResult {
        let (Data::Number(a), Data::Number(b)) = (&self.data, &other.data) else {
            return Err(match self.data {
                           Data::Number(_) => self.incompatible(other),
                           _ => self.undefined_operator(op),
                       });
        };

        let result = match op {
            BinaryOperator::Equal => a == b,
            BinaryOperator::NotEqual => a != b,
            BinaryOperator::Less => a < b,
            BinaryOperator::Greater => a > b,
            BinaryOperator::LessEqual => a <= b,
            _ => a >= b,
        };
        Ok(Self::from_bool(result))
    }

    /// `and` / `or` between numbers. Both operands are always evaluated.
    fn logic(&self, op: BinaryOperator, other: &Self) -> OpResult {
        let (Data::Number(a), Data::Number(b)) = (&self.data, &other.data) else {
            return Err(match self.data {
                           Data::Number(_) => self.incompatible(other),
                           _ => self.undefined_keyword(op.symbol()),
                       });
        };

        let result = if op == BinaryOperator::And {
            *a != 0.0 && *b != 0.0
        } else {
            *a != 0.0 || *b != 0.0
        };
        Ok(Self::from_bool(result))
    }

    fn incompatible(&self, other: &Self) -> RuntimeErrorKind {
        RuntimeErrorKind::IncompatibleType { from: other.kind_name(),
                                             to:   self.kind_name(), }
    }

    fn undefined_operator(&self, op: BinaryOperator) -> RuntimeErrorKind {
        RuntimeErrorKind::UndefinedOperator { operator: op.symbol(),
                                              kind:     self.kind_name(), }
    }

    fn undefined_keyword(&self, keyword: &'static str) -> RuntimeErrorKind {
        RuntimeErrorKind::UndefinedKeyword { keyword,
                                             kind: self.kind_name() }
    }
}
