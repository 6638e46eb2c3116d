use std::collections::HashMap;
use std::iter;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::expression::{Expression, Keyword, Pair, Symbol};
use crate::parser::Program;
use crate::runtime::{Environment, Procedure};
use crate::tools::{Tool, ToolRegistry};

/// LISP evaluator with tail-call elimination
///
/// Evaluates programs against a global environment seeded with every host
/// function of its [`ToolRegistry`]. Special forms:
/// - `(quote e)` / `'e` - `e`, unevaluated
/// - `(define name value)` - Bind a name
/// - `(set! name value)` - Rebind an existing name
/// - `(lambda (params...) body...)` - Closure over the current frame
/// - `(if test consequent [alternative])` - Conditional
/// - `(begin e...)` - Sequence
/// - `(let ((name value)...) body...)` - Simultaneous local bindings
///
/// Tail positions (`if` branches, the last expression of `begin`, `let` and
/// closure bodies) are evaluated by looping instead of recursing, so
/// tail-recursive procedures run in constant stack space.
pub struct LispEvaluator {
    /// Global frame
    env: Environment,
    /// Host functions the global frame was seeded from
    registry: Arc<ToolRegistry>,
}

impl LispEvaluator {
    /// Creates a new evaluator over the standard library
    pub fn new() -> Self {
        Self::with_registry(ToolRegistry::new())
    }

    /// Creates a new evaluator with custom tool registry
    pub fn with_registry(registry: ToolRegistry) -> Self {
        let env = Environment::new();
        for (name, tool) in registry.iter() {
            env.define(name, Expression::HostFunction(Arc::clone(tool)));
        }

        LispEvaluator {
            env,
            registry: Arc::new(registry),
        }
    }

    /// Global frame
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Registry the global frame was seeded from
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Binds a host value in the global frame, replacing any existing binding
    pub fn bind(&mut self, name: impl Into<String>, value: Expression) {
        let name = name.into();
        debug!(name = %name, kind = value.type_name(), "binding host value");
        self.env.define(name, value);
    }

    /// Binds a host function in the global frame under its own name
    pub fn bind_tool<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.bind(name, Expression::host(tool));
    }

    /// Merges host bindings into the global frame
    pub fn bind_all(&mut self, bindings: HashMap<String, Expression>) {
        for (name, value) in bindings {
            self.bind(name, value);
        }
    }

    /// Execute a program, returning the value of its last expression
    ///
    /// An empty program yields [`Expression::Unspecified`].
    pub fn execute(&mut self, program: &Program) -> Result<Expression> {
        debug!(expressions = program.expressions.len(), "executing program");

        let mut last_val = Expression::Unspecified;
        for expr in &program.expressions {
            last_val = self.evaluate(expr, &self.env)?;
        }

        Ok(last_val)
    }

    /// Evaluate one expression in `env`
    pub fn evaluate(&self, expr: &Expression, env: &Environment) -> Result<Expression> {
        let mut expr = expr.clone();
        let mut env = env.clone();

        loop {
            let pair: Rc<Pair> = match &expr {
                Expression::Symbol(sym) => return self.lookup(sym, &env),
                Expression::Number(_)
                | Expression::String(_)
                | Expression::Boolean(_)
                | Expression::EmptyList
                | Expression::Procedure(_) => return Ok(expr.clone()),
                Expression::HostFunction(_) | Expression::Unspecified => {
                    return Err(Error::IllegalExpression(expr.display_string()))
                }
                Expression::Pair(pair) => Rc::clone(pair),
            };

            let operator = pair.first();
            let operands = pair.rest().to_vec();

            let keyword = operator.as_symbol().and_then(Symbol::keyword);
            if let Some(keyword) = keyword {
                match keyword {
                    Keyword::Quote => return self.eval_quote(&operands),
                    Keyword::Define => return self.eval_define(&operands, &env),
                    Keyword::Set => return self.eval_set(&operands, &env),
                    Keyword::Lambda => return self.eval_lambda(&operands, &env),

                    Keyword::If => {
                        if operands.len() < 2 || operands.len() > 3 {
                            return Err(Error::malformed(
                                "if",
                                format!("expected 2 or 3 operands, got {}", operands.len()),
                            ));
                        }

                        let test = self.evaluate(&operands[0], &env)?;
                        expr = if test.is_truthy() {
                            operands[1].clone()
                        } else {
                            match operands.get(2) {
                                Some(alternative) => alternative.clone(),
                                None => return Ok(Expression::Unspecified),
                            }
                        };
                        continue;
                    }

                    Keyword::Begin => {
                        if operands.is_empty() {
                            return Ok(Expression::Unspecified);
                        }
                        expr = self.eval_sequence(&operands, &env)?;
                        continue;
                    }

                    Keyword::Let => {
                        let frame = self.eval_let_bindings(&operands, &env)?;
                        expr = self.eval_sequence(&operands[1..], &frame)?;
                        env = frame;
                        continue;
                    }
                }
            }

            // Application. A symbol operator is looked up; any other operator
            // is evaluated like the remaining elements. Host functions are only
            // applied through a symbol; a pair operator yielding one is data.
            let callee = self.evaluate(operator, &env)?;
            let args = operands
                .iter()
                .map(|arg| self.evaluate(arg, &env))
                .collect::<Result<Vec<_>>>()?;

            match callee {
                Expression::HostFunction(tool) if !operator.is_pair() => {
                    return self.call_host(tool.as_ref(), args)
                }

                Expression::Procedure(proc) => {
                    trace!(procedure = ?proc, args = args.len(), "applying closure");
                    let frame = proc.bind(args)?;
                    expr = self.eval_sequence(proc.body(), &frame)?;
                    env = frame;
                    continue;
                }

                // Lists that do not start with a callable are data.
                data => return Expression::list(iter::once(data).chain(args)),
            }
        }
    }

    fn lookup(&self, sym: &Symbol, env: &Environment) -> Result<Expression> {
        if sym.is_keyword() {
            return Err(Error::KeywordReference {
                name: sym.name().to_string(),
            });
        }

        env.get(sym.name()).ok_or_else(|| Error::UndefinedSymbol {
            name: sym.name().to_string(),
        })
    }

    /// Evaluates all but the last expression for effect and returns the last
    /// one unevaluated, for the caller to continue on in tail position
    fn eval_sequence(&self, body: &[Expression], env: &Environment) -> Result<Expression> {
        let (last, init) = body
            .split_last()
            .ok_or_else(|| Error::runtime("Cannot evaluate an empty sequence"))?;

        for expr in init {
            self.evaluate(expr, env)?;
        }

        Ok(last.clone())
    }

    fn call_host(&self, tool: &dyn Tool, args: Vec<Expression>) -> Result<Expression> {
        if args.len() < tool.arity() {
            return Err(Error::ArityMismatch {
                name: tool.name().to_string(),
                expected: tool.arity(),
                received: args.iter().map(Expression::display_string).collect(),
            });
        }

        tool.execute(&args)
    }

    // Special forms

    /// (quote e) - Return e unevaluated
    fn eval_quote(&self, operands: &[Expression]) -> Result<Expression> {
        match operands {
            [quoted] => Ok(quoted.clone()),
            _ => Err(Error::malformed(
                "quote",
                format!("expected 1 operand, got {}", operands.len()),
            )),
        }
    }

    /// Name targeted by `define` / `set!`
    fn binding_target<'a>(&self, form: &str, operands: &'a [Expression]) -> Result<&'a Symbol> {
        if operands.len() != 2 {
            return Err(Error::malformed(
                form,
                format!("expected 2 operands, got {}", operands.len()),
            ));
        }

        let name = operands[0].as_symbol().ok_or_else(|| {
            Error::malformed(
                form,
                format!("target must be a symbol: {}", operands[0].display_string()),
            )
        })?;

        if name.is_keyword() {
            return Err(Error::KeywordReference {
                name: name.name().to_string(),
            });
        }

        Ok(name)
    }

    /// (define name value) - Bind through [`Environment::set`]
    fn eval_define(&self, operands: &[Expression], env: &Environment) -> Result<Expression> {
        let name = self.binding_target("define", operands)?;
        let value = self.evaluate(&operands[1], env)?;
        env.set(name.name(), value);
        Ok(Expression::Unspecified)
    }

    /// (set! name value) - Rebind a name that is already bound
    fn eval_set(&self, operands: &[Expression], env: &Environment) -> Result<Expression> {
        let name = self.binding_target("set!", operands)?;
        if !env.has(name.name()) {
            return Err(Error::UndefinedAssignment {
                name: name.name().to_string(),
            });
        }

        let value = self.evaluate(&operands[1], env)?;
        env.set(name.name(), value);
        Ok(Expression::Unspecified)
    }

    /// (lambda (params...) body...) - Create a closure over `env`
    fn eval_lambda(&self, operands: &[Expression], env: &Environment) -> Result<Expression> {
        let (params, body) = operands
            .split_first()
            .ok_or_else(|| Error::malformed("lambda", "missing parameter list"))?;

        if !params.is_list() {
            return Err(Error::runtime("Lambda params must be a list expression"));
        }

        let proc = Procedure::new(params.to_vec(), body.to_vec(), env.clone())?;
        Ok(Expression::Procedure(Rc::new(proc)))
    }

    /// Evaluates the bindings of `(let ((name value)...) body...)` in `env`
    /// and returns the frame holding them
    fn eval_let_bindings(&self, operands: &[Expression], env: &Environment) -> Result<Environment> {
        if operands.len() < 2 {
            return Err(Error::malformed("let", "expected a binding list and a body"));
        }

        let bindings = &operands[0];
        if !bindings.is_list() {
            return Err(Error::malformed(
                "let",
                format!("bindings must be a list: {}", bindings.display_string()),
            ));
        }

        // Every value sees the outer frame only.
        let mut evaluated = Vec::new();
        for binding in bindings.iter() {
            let (name, value) = match binding.to_vec().as_slice() {
                [Expression::Symbol(name), value] if binding.is_pair() => (name.clone(), value.clone()),
                _ => {
                    return Err(Error::malformed(
                        "let",
                        format!("binding must be (name value): {}", binding.display_string()),
                    ))
                }
            };

            if name.is_keyword() {
                return Err(Error::KeywordReference {
                    name: name.name().to_string(),
                });
            }

            evaluated.push((name, self.evaluate(&value, env)?));
        }

        let frame = env.child();
        for (name, value) in evaluated {
            frame.define(name.name(), value);
        }

        Ok(frame)
    }
}

impl Default for LispEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

// Top-level closures capture the global frame they are bound in.
impl Drop for LispEvaluator {
    fn drop(&mut self) {
        self.env.clear();
    }
}
