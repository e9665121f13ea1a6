use std::rc::Rc;

use crate::{
    ast::{Branch, IfCase},
    interpreter::{environment::Context, evaluator::core::EvalResult, value::core::Value},
};

impl Context {
    /// Evaluates an `if` chain.
    ///
    /// Cases are tried in order and the first true condition wins. The
    /// chosen arm yields its value in the single-line form and null in the
    /// multi-line form. Without a matching arm the result is null.
    pub(in crate::interpreter::evaluator) fn eval_if(self: &Rc<Self>,
                                                     cases: &[IfCase],
                                                     else_branch: Option<&Branch>)
                                                     -> EvalResult<Value> {
        for case in cases {
            let condition = self.evaluate(&case.condition)?;

            if self.condition(&condition, case.condition.span())? {
                let value = self.evaluate(&case.body)?;
                return Ok(if case.suppress_value { Value::null() } else { value });
            }
        }

        match else_branch {
            Some(branch) => {
                let value = self.evaluate(&branch.body)?;
                Ok(if branch.suppress_value { Value::null() } else { value })
            },
            None => Ok(Value::null()),
        }
    }
}
