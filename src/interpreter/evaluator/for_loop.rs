use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeErrorKind,
    interpreter::{
        environment::Context,
        evaluator::core::{EvalResult, Unwind},
        value::core::{Data, Value},
    },
};

/// What a loop does after one evaluation of its body.
enum Iteration {
    Collect(Value),
    Skip,
    Stop,
}

impl Context {
    /// Evaluates a counted loop.
    ///
    /// `start`, `end` and `step` must be numbers; `step` defaults to `1`. The
    /// loop counts up while `i < end` for a non-negative step and down while
    /// `i > end` otherwise, rebinding the loop variable in the current scope
    /// before each pass.
    ///
    /// # Returns
    /// The list of per-iteration values for a single-line body, null for the
    /// multi-line form.
    ///
    /// # Errors
    /// `InvalidLoopBounds` if a bound or the step is not a number, plus any
    /// error raised by the body.
    pub(in crate::interpreter::evaluator) fn eval_for(self: &Rc<Self>,
                                                      var_name: &str,
                                                      start: &Node,
                                                      end: &Node,
                                                      step: Option<&Node>,
                                                      body: &Node,
                                                      suppress_value: bool)
                                                      -> EvalResult<Value> {
        let mut current = self.loop_bound(start)?;
        let end = self.loop_bound(end)?;
        let step = match step {
            Some(step) => self.loop_bound(step)?,
            None => 1.0,
        };

        let ascending = step >= 0.0;
        let mut elements = Vec::new();

        while if ascending { current < end } else { current > end } {
            self.assign(var_name, &Value::number(current));
            current += step;

            match self.iterate(body)? {
                Iteration::Collect(value) if !suppress_value => elements.push(value),
                Iteration::Collect(_) | Iteration::Skip => {},
                Iteration::Stop => break,
            }
        }

        Ok(if suppress_value { Value::null() } else { Value::list(elements) })
    }

    /// Evaluates a conditional loop, with the same body rules as `for`.
    pub(in crate::interpreter::evaluator) fn eval_while(self: &Rc<Self>,
                                                        condition: &Node,
                                                        body: &Node,
                                                        suppress_value: bool)
                                                        -> EvalResult<Value> {
        let mut elements = Vec::new();

        loop {
            let value = self.evaluate(condition)?;
            if !self.condition(&value, condition.span())? {
                break;
            }

            match self.iterate(body)? {
                Iteration::Collect(value) if !suppress_value => elements.push(value),
                Iteration::Collect(_) | Iteration::Skip => {},
                Iteration::Stop => break,
            }
        }

        Ok(if suppress_value { Value::null() } else { Value::list(elements) })
    }

    /// Runs the body once, absorbing `continue` and `break`.
    fn iterate(self: &Rc<Self>, body: &Node) -> EvalResult<Iteration> {
        match self.evaluate(body) {
            Ok(value) => Ok(Iteration::Collect(value.copy())),
            Err(Unwind::Continue) => Ok(Iteration::Skip),
            Err(Unwind::Break) => Ok(Iteration::Stop),
            Err(other) => Err(other),
        }
    }

    fn loop_bound(self: &Rc<Self>, node: &Node) -> EvalResult<f64> {
        match self.evaluate(node)?.data {
            Data::Number(n) => Ok(n),
            _ => Err(self.error(RuntimeErrorKind::InvalidLoopBounds, node.span())),
        }
    }
}
