use std::rc::Rc;

use crate::{
    ast::{Node, UnaryOperator},
    diagnostics::Span,
    interpreter::{environment::Context, evaluator::core::EvalResult, value::core::Value},
};

impl Context {
    /// Evaluates `+x`, `-x` or `not x`.
    ///
    /// Errors point from the operator to the end of the operand.
    pub(in crate::interpreter::evaluator) fn eval_unary(self: &Rc<Self>,
                                                        op: UnaryOperator,
                                                        op_span: &Span,
                                                        operand: &Node)
                                                        -> EvalResult<Value> {
        let value = self.evaluate(operand)?;

        value.unary(op)
             .map(|result| result.with_provenance(op_span.clone(), Rc::clone(self)))
             .map_err(|kind| self.error(kind, &op_span.to(operand.span())))
    }
}
