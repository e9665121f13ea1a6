use std::{fmt, rc::Rc};

use crate::{
    ast::Node,
    diagnostics::Span,
    error::RuntimeErrorKind,
    interpreter::{
        environment::{Context, Scope, SymbolTable},
        evaluator::{
            core::{EvalResult, Unwind},
            function::{builtin, list, print, run},
            utils::check_arity,
        },
        host::Host,
        value::{
            core::{Data, Value},
            function::UserFunction,
        },
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin reads its arguments by parameter name from the invocation's
/// frame and returns its result.
pub type BuiltinFn = fn(&Invocation<'_>) -> EvalResult<Value>;

/// A builtin function: its name, declared parameters and implementation.
pub struct BuiltinDef {
    pub name:   &'static str,
    pub params: &'static [&'static str],
    pub func:   BuiltinFn,
}

impl fmt::Debug for BuiltinDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinDef")
         .field("name", &self.name)
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the parameter names arguments are bound to,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table the root scope is seeded from),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:literal),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, params: &[$($param),*], func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"       => { params: ["value"], func: print::print },
    "print_ret"   => { params: ["value"], func: print::print_ret },
    "input"       => { params: [], func: print::input },
    "input_int"   => { params: [], func: print::input_int },
    "clear"       => { params: [], func: print::clear },
    "is_number"   => { params: ["value"], func: builtin::is_number },
    "is_string"   => { params: ["value"], func: builtin::is_string },
    "is_list"     => { params: ["value"], func: builtin::is_list },
    "is_function" => { params: ["value"], func: builtin::is_function },
    "append"      => { params: ["list", "value"], func: list::append },
    "pop"         => { params: ["list", "index"], func: list::pop },
    "extend"      => { params: ["listA", "listB"], func: list::extend },
    "len"         => { params: ["list"], func: builtin::len },
    "run"         => { params: ["fn"], func: run::run },
}

/// One running builtin call.
pub struct Invocation<'a> {
    /// The builtin's own frame; its scope holds the arguments.
    pub frame: Rc<Context>,
    /// The call expression.
    pub site:  &'a Span,
}

impl Invocation<'_> {
    /// Reads the argument bound to `param`.
    pub fn arg(&self, param: &str) -> Value {
        self.frame.lookup(param).unwrap_or_else(Value::null)
    }

    /// Builds an error located at the call, raised inside the builtin's frame.
    pub fn error(&self, kind: RuntimeErrorKind) -> Unwind {
        self.frame.error(kind, self.site)
    }

    pub fn host(&self) -> &dyn Host {
        self.frame.host.as_ref()
    }
}

impl Context {
    /// Creates a function value closing over this context's scope and binds it
    /// under its name, if it has one.
    pub(in crate::interpreter::evaluator) fn eval_func_def(self: &Rc<Self>,
                                                           name: Option<&String>,
                                                           params: &[String],
                                                           body: &Rc<Node>,
                                                           expression_body: bool)
                                                           -> Value {
        let function = UserFunction { name: name.cloned(),
                                      params: params.to_vec(),
                                      body: Rc::clone(body),
                                      expression_body,
                                      closure: Rc::clone(&self.symbols) };
        let value = Value::new(Data::Function(Rc::new(function)));

        if let Some(name) = name {
            self.assign(name.as_str(), &value);
        }

        value
    }

    /// Evaluates a call expression.
    ///
    /// The callee is evaluated and copied, then the arguments left to right,
    /// then the function runs. The result is attributed to the call.
    pub(in crate::interpreter::evaluator) fn eval_call(self: &Rc<Self>,
                                                       callee: &Node,
                                                       args: &[Node],
                                                       span: &Span)
                                                       -> EvalResult<Value> {
        let callee = self.evaluate(callee)?.copy();
        let args = args.iter()
                       .map(|arg| self.evaluate(arg))
                       .collect::<EvalResult<Vec<_>>>()?;

        let result = callee.execute(args, self, span)?;
        Ok(result.with_provenance(span.clone(), Rc::clone(self)))
    }

    /// Opens the frame of a call made from this context at `site`.
    ///
    /// The argument count is checked before anything is bound; parameters are
    /// bound positionally in the new scope.
    fn enter<P: AsRef<str>>(self: &Rc<Self>,
                            name: &str,
                            params: &[P],
                            args: Vec<Value>,
                            scope_parent: Option<Scope>,
                            site: &Span)
                            -> EvalResult<Rc<Self>> {
        check_arity(args.as_slice(), params, name).map_err(|kind| self.error(kind, site))?;

        let frame = self.child(name, site.start.clone(), SymbolTable::new(scope_parent));
        for (param, arg) in params.iter().zip(args) {
            frame.assign(param.as_ref(), &arg);
        }

        Ok(frame)
    }
}

impl Value {
    /// Calls this value with already evaluated arguments.
    ///
    /// # Parameters
    /// - `args`: Argument values, in order.
    /// - `caller`: The context the call is made from.
    /// - `site`: The call expression, used for errors and the traceback.
    ///
    /// # Errors
    /// `IllegalOperation` if the value is not callable, an argument count
    /// error on a mismatch, or whatever the body raises.
    pub fn execute(&self, args: Vec<Self>, caller: &Rc<Context>, site: &Span) -> EvalResult<Self> {
        match &self.data {
            Data::Function(function) => function.call(args, caller, site),
            Data::Builtin(builtin) => builtin.call(args, caller, site),
            _ => Err(caller.error(RuntimeErrorKind::IllegalOperation, site)),
        }
    }
}

impl UserFunction {
    /// Runs the body in a new frame whose scope is nested in the closure.
    ///
    /// An arrow function yields its body's value. A block function yields the
    /// value of the `return` that ended it, or null. `break` and `continue`
    /// that escape the body end the call with null.
    fn call(&self, args: Vec<Value>, caller: &Rc<Context>, site: &Span) -> EvalResult<Value> {
        let name = self.display_name();
        let frame = caller.enter(name, self.params.as_slice(), args, Some(Rc::clone(&self.closure)), site)?;
        log::trace!("calling {name} from {}", caller.display_name);

        let result = match frame.evaluate(&self.body) {
            Ok(value) if self.expression_body => Ok(value.copy()),
            Ok(_) | Err(Unwind::Continue | Unwind::Break) => Ok(Value::null()),
            Err(Unwind::Return(value)) => Ok(value.copy()),
            Err(error @ Unwind::Error(_)) => Err(error),
        };
        frame.release();

        result
    }
}

impl BuiltinDef {
    fn call(&self, args: Vec<Value>, caller: &Rc<Context>, site: &Span) -> EvalResult<Value> {
        let frame = caller.enter(self.name, self.params, args, None, site)?;
        log::trace!("calling builtin {} from {}", self.name, caller.display_name);

        (self.func)(&Invocation { frame, site })
    }
}
