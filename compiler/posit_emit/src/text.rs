//! Generation-time backend: calls rendered as source text.

use std::fmt::Write as _;

use posit_diagnostic::ResolveResult;
use posit_dispatch::Backend;
use posit_ir::{ConcreteArgument, Variant, VarRef};

/// One call the emitter accepted, in structured form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedCall {
    pub target: String,
    pub args: Vec<ConcreteArgument>,
}

/// Renders `target(home, arg, ...);` lines.
///
/// Integers are written as literals, handles as variable expressions
/// (`x3`, `-x3`, `b2`, `!b2`, `s1`), constants presented as variables as
/// `IntVar(home, c, c)`, offsets as `(c + x)`, scales as `(c * x)`, and arrays as `{...}`.
/// Variables are named by store index unless names are supplied.
#[derive(Clone, Debug, Default)]
pub struct TextEmitter {
    names: Vec<String>,
    source: String,
    calls: Vec<EmittedCall>,
}

impl TextEmitter {
    pub fn new() -> Self {
        TextEmitter::default()
    }

    /// Use `names[i]` for the variable at store index `i`.
    pub fn with_names(names: Vec<String>) -> Self {
        TextEmitter {
            names,
            ..TextEmitter::default()
        }
    }

    /// Everything emitted so far, one call per line.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn calls(&self) -> &[EmittedCall] {
        &self.calls
    }

    pub fn into_source(self) -> String {
        self.source
    }

    fn pair(&self, out: &mut String, c: i64, op: &str, r: VarRef) {
        let _ = write!(out, "({c}{op}");
        self.var(out, r);
        out.push(')');
    }

    fn var(&self, out: &mut String, r: VarRef) {
        let Some(id) = r.var() else {
            if let VarRef::Const(c) = r {
                let _ = write!(out, "IntVar(home, {c}, {c})");
            }
            return;
        };
        let prefix = match r {
            VarRef::Minus(_) => "-",
            VarRef::NotBool(_) => "!",
            _ => "",
        };
        out.push_str(prefix);
        match self.names.get(id.index()) {
            Some(name) => out.push_str(name),
            None => {
                let letter = match r {
                    VarRef::Bool(_) | VarRef::NotBool(_) => 'b',
                    VarRef::Set(_) => 's',
                    _ => 'x',
                };
                let _ = write!(out, "{letter}{id}");
            }
        }
    }

    fn arg(&self, out: &mut String, arg: &ConcreteArgument) {
        match arg {
            ConcreteArgument::Int(n) => {
                let _ = write!(out, "{n}");
            }
            ConcreteArgument::Set(set) => {
                let _ = write!(out, "IntSet({set})");
            }
            ConcreteArgument::Literal(literal) => {
                let _ = write!(out, "{literal}");
            }
            ConcreteArgument::Var(r) => self.var(out, *r),
            ConcreteArgument::Offset(c, r) => self.pair(out, *c, " + ", *r),
            ConcreteArgument::Scale(c, r) => self.pair(out, *c, " * ", *r),
            ConcreteArgument::Array(items) => {
                out.push('{');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.arg(out, item);
                }
                out.push('}');
            }
        }
    }

    /// Render one call without recording it.
    pub fn render(&self, target: &str, args: &[ConcreteArgument]) -> String {
        let mut line = format!("{target}(home");
        for arg in args {
            line.push_str(", ");
            self.arg(&mut line, arg);
        }
        line.push_str(");");
        line
    }
}

impl Backend for TextEmitter {
    fn accept(&mut self, variant: &Variant, args: &[ConcreteArgument]) -> ResolveResult<()> {
        let line = self.render(variant.target(), args);
        tracing::trace!(%line, "emitted");
        self.source.push_str(&line);
        self.source.push('\n');
        self.calls.push(EmittedCall {
            target: variant.target().to_string(),
            args: args.to_vec(),
        });
        Ok(())
    }
}
