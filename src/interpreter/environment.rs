use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    diagnostics::Position,
    interpreter::{
        evaluator::function::core::BUILTIN_TABLE,
        host::Host,
        value::core::{Data, Value},
    },
};

/// A shared, mutable symbol table.
pub type Scope = Rc<RefCell<SymbolTable>>;

/// Name bindings of one scope, with a link to the enclosing scope.
#[derive(Default)]
pub struct SymbolTable {
    parent:   Option<Scope>,
    bindings: HashMap<String, Value>,
}

impl SymbolTable {
    /// Creates an empty scope nested in `parent`.
    pub fn new(parent: Option<Scope>) -> Scope {
        Rc::new(RefCell::new(Self { parent,
                                    bindings: HashMap::new() }))
    }

    /// Looks `name` up here and then in each enclosing scope.
    ///
    /// A local binding always shadows outer ones, even when it is bound to
    /// null.
    ///
    /// # Example
    /// ```
    /// use basic::interpreter::{environment::SymbolTable, value::core::Value};
    ///
    /// let outer = SymbolTable::new(None);
    /// outer.borrow_mut().set("a", Value::number(1.0));
    /// let inner = SymbolTable::new(Some(outer.clone()));
    ///
    /// assert_eq!(inner.borrow().get("a"), Some(Value::number(1.0)));
    ///
    /// inner.borrow_mut().set("a", Value::null());
    /// assert_eq!(inner.borrow().get("a"), Some(Value::null()));
    /// assert_eq!(outer.borrow().get("a"), Some(Value::number(1.0)));
    /// ```
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|parent| parent.borrow().get(name)),
        }
    }

    /// Binds `name` in this scope. Enclosing scopes are never written.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }
}

/// One frame of execution: the program itself or a function call.
///
/// Contexts form the dynamic call chain used for tracebacks, while each
/// context's `symbols` chain follows lexical nesting.
pub struct Context {
    /// `<program>` or the called function's name.
    pub display_name: String,
    /// The caller's context.
    pub parent:       Option<Rc<Self>>,
    /// Where in the caller this frame was entered.
    pub entry_pos:    Option<Position>,
    pub symbols:      Scope,
    pub host:         Rc<dyn Host>,
}

impl Context {
    /// Creates a root context whose scope holds the constants and every
    /// builtin function.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use basic::interpreter::{environment::Context, host::BufferHost};
    ///
    /// let root = Context::global(Rc::new(BufferHost::new()));
    ///
    /// assert!(root.lookup("math_pi").is_some());
    /// assert!(root.lookup("print").is_some_and(|v| v.is_function()));
    /// ```
    pub fn global(host: Rc<dyn Host>) -> Rc<Self> {
        let symbols = SymbolTable::new(None);
        {
            let mut table = symbols.borrow_mut();
            for (name, value) in Value::constants() {
                table.set(name, value);
            }
            for builtin in BUILTIN_TABLE {
                table.set(builtin.name, Value::new(Data::Builtin(builtin)));
            }
        }

        Rc::new(Self { display_name: "<program>".to_string(),
                       parent: None,
                       entry_pos: None,
                       symbols,
                       host })
    }

    /// Creates a frame called from `self`.
    pub fn child(self: &Rc<Self>,
                 display_name: impl Into<String>,
                 entry_pos: Position,
                 symbols: Scope)
                 -> Rc<Self> {
        Rc::new(Self { display_name: display_name.into(),
                       parent: Some(Rc::clone(self)),
                       entry_pos: Some(entry_pos),
                       symbols,
                       host: Rc::clone(&self.host) })
    }

    /// The outermost context of the call chain.
    pub fn root(self: &Rc<Self>) -> Rc<Self> {
        let mut context = Rc::clone(self);
        while let Some(parent) = context.parent.clone() {
            context = parent;
        }
        context
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.symbols.borrow().get(name)
    }

    /// Clears this frame's bindings once nothing outside the frame can reach
    /// its scope.
    ///
    /// A function defined in a frame is bound in the scope it closes over,
    /// which keeps that scope alive forever. When the only other holders of
    /// the scope are such functions, and nothing else holds those functions,
    /// the bindings are dropped to break the cycle.
    pub fn release(&self) {
        let mut table = self.symbols.borrow_mut();
        let self_bound = table.bindings
                              .values()
                              .filter(|value| {
                                  matches!(&value.data, Data::Function(function)
                                      if Rc::strong_count(function) == 1
                                         && Rc::ptr_eq(&function.closure, &self.symbols))
                              })
                              .count();

        if Rc::strong_count(&self.symbols) == 1 + self_bound {
            table.bindings.clear();
        }
    }

    /// Binds `name` in this context's own scope. The stored value is a
    /// provenance-free copy.
    pub fn assign(&self, name: impl Into<String>, value: &Value) {
        self.symbols.borrow_mut().set(name, value.copy());
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
         .field("display_name", &self.display_name)
         .field("entry_pos", &self.entry_pos)
         .field("parent", &self.parent.as_ref().map(|p| p.display_name.as_str()))
         .finish_non_exhaustive()
    }
}
