use std::rc::Rc;

use crate::{
    ast::Node,
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{environment::Context, value::core::Value},
};

/// Why evaluation of a node stopped early.
///
/// Errors and the three control-flow signals travel the same way: every
/// composite node propagates them with `?` as soon as a child produces one,
/// so nothing after the child is evaluated. Loops absorb `Continue` and
/// `Break`; function calls absorb `Return`.
#[derive(Debug)]
pub enum Unwind {
    Error(Box<RuntimeError>),
    Return(Value),
    Continue,
    Break,
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Self::Error(Box::new(error))
    }
}

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, Unwind>;

impl Context {
    /// Evaluates a node in this context.
    ///
    /// Literals, lists, variable reads, conditionals, loops and function
    /// definitions produce values attributed to the node's own span.
    /// Operators are attributed to their operator token and calls to the call
    /// expression.
    ///
    /// # Parameters
    /// - `node`: The node to evaluate.
    ///
    /// # Returns
    /// The node's value, or the error or signal that interrupted it.
    pub fn evaluate(self: &Rc<Self>, node: &Node) -> EvalResult<Value> {
        let value = match node {
            Node::NumberLiteral { value, .. } => Value::number(*value),
            Node::StringLiteral { value, .. } => Value::string(value.as_str()),
            Node::ListLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.evaluate(element).map(|value| value.copy()))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Value::list(values)
            },
            Node::VarAccess { name, span } => {
                self.lookup(name)
                    .ok_or_else(|| self.error(RuntimeErrorKind::NotDefined(name.clone()), span))?
                    .copy()
            },
            Node::VarAssign { name, value, .. } => {
                let value = self.evaluate(value)?;
                self.assign(name.as_str(), &value);
                return Ok(value);
            },
            Node::BinaryOp { left,
                             op,
                             op_span,
                             right,
                             span, } => return self.eval_binary(left, *op, op_span, right, span),
            Node::UnaryOp { op, op_span, operand, .. } => {
                return self.eval_unary(*op, op_span, operand);
            },
            Node::If { cases, else_branch, .. } => self.eval_if(cases, else_branch.as_deref())?,
            Node::For { var_name,
                        start,
                        end,
                        step,
                        body,
                        suppress_value,
                        .. } => {
                self.eval_for(var_name, start, end, step.as_deref(), body, *suppress_value)?
            },
            Node::While { condition,
                          body,
                          suppress_value,
                          .. } => self.eval_while(condition, body, *suppress_value)?,
            Node::FuncDef { name,
                            params,
                            body,
                            expression_body,
                            .. } => self.eval_func_def(name.as_ref(), params, body, *expression_body),
            Node::Call { callee, args, span } => return self.eval_call(callee, args, span),
            Node::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::null(),
                };
                return Err(Unwind::Return(value));
            },
            Node::Continue { .. } => return Err(Unwind::Continue),
            Node::Break { .. } => return Err(Unwind::Break),
        };

        Ok(value.with_provenance(node.span().clone(), Rc::clone(self)))
    }
}
