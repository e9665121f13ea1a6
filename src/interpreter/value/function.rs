use std::{fmt, rc::Rc};

use crate::{ast::Node, interpreter::environment::Scope};

/// A function defined in source code.
///
/// The closure is the scope that was current where the definition was
/// evaluated, so a function sees its own name and the locals around it.
pub struct UserFunction {
    pub name:            Option<String>,
    pub params:          Vec<String>,
    pub body:            Rc<Node>,
    /// Arrow functions return their body's value; block functions need an
    /// explicit `return`.
    pub expression_body: bool,
    pub closure:         Scope,
}

impl UserFunction {
    /// The name shown in tracebacks and when printed.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
         .field("name", &self.name)
         .field("params", &self.params)
         .field("expression_body", &self.expression_body)
         .finish_non_exhaustive()
    }
}
