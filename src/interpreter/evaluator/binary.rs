use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Node},
    diagnostics::Span,
    interpreter::{environment::Context, evaluator::core::EvalResult, value::core::Value},
};

impl Context {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated, left first, before the operator is
    /// applied; `and` and `or` do not short-circuit.
    ///
    /// # Parameters
    /// - `left`, `right`: Operand expressions.
    /// - `op`: The operator.
    /// - `op_span`: The operator token, which the result is attributed to.
    /// - `span`: The whole expression, which most operator errors point at.
    ///
    /// # Returns
    /// The result of the operator contract.
    ///
    /// # Errors
    /// Division by zero and bad list indices point at the right operand;
    /// every other operator error points at the whole expression.
    pub(in crate::interpreter::evaluator) fn eval_binary(self: &Rc<Self>,
                                                         left: &Node,
                                                         op: BinaryOperator,
                                                         op_span: &Span,
                                                         right: &Node,
                                                         span: &Span)
                                                         -> EvalResult<Value> {
        let lhs = self.evaluate(left)?;
        let rhs = self.evaluate(right)?;

        match lhs.binary(op, &rhs) {
            Ok(value) => Ok(value.with_provenance(op_span.clone(), Rc::clone(self))),
            Err(kind) => {
                let blamed = if kind.blames_right_operand() {
                    right.span()
                } else {
                    span
                };
                Err(self.error(kind, blamed))
            },
        }
    }
}
