use std::fmt::{self, Write};

use super::{
    expressions::{Binding, Constant, ConstantValue, Exp, Expa, Expb, Func},
    statements::{Program, Stmt, StmtKind},
};

/// Writes a node and its children as an indented tree, two spaces per level.
/// Nodes are `+ kind [type]` lines and leaf values are `| name value` lines.
pub trait Serialize {
    fn serialize(&self, sink: &mut dyn Write, depth: usize) -> fmt::Result;
}

fn node(sink: &mut dyn Write, depth: usize, label: &str, ty: &str) -> fmt::Result {
    writeln!(sink, "{}+ {} [{}]", "  ".repeat(depth), label, ty)
}

fn field(sink: &mut dyn Write, depth: usize, name: &str, value: &dyn fmt::Display) -> fmt::Result {
    writeln!(sink, "{}| {} {}", "  ".repeat(depth), name, value)
}

impl Program {
    /// The whole tree as a string.
    pub fn dump(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        self.serialize(&mut out, 0).map(|_| out)
    }
}

impl Serialize for Program {
    fn serialize(&self, sink: &mut dyn Write, depth: usize) -> fmt::Result {
        writeln!(sink, "{}+ program", "  ".repeat(depth))?;
        for stmt in &self.stmts {
            stmt.serialize(sink, depth + 1)?;
        }

        for func in self.scopes.all_tags_in_current(self.scope) {
            field(sink, depth + 1, "fun", &format!("{} : {}", func.name, func.type_name()))?;
        }

        Ok(())
    }
}

impl Serialize for Stmt {
    fn serialize(&self, sink: &mut dyn Write, depth: usize) -> fmt::Result {
        match &self.kind {
            StmtKind::Var(var) => {
                node(sink, depth, "stmt var", var.symbol.ty.name())?;
                field(sink, depth + 1, "name", &var.symbol.name)
            }
            StmtKind::VarAssign(symbol, value) => {
                node(sink, depth, "stmt var_assign", symbol.ty.name())?;
                field(sink, depth + 1, "name", &symbol.name)?;
                value.serialize(sink, depth + 1)
            }
            StmtKind::FuncAssign(func) => {
                writeln!(sink, "{}+ stmt func_assign", "  ".repeat(depth))?;
                func.serialize(sink, depth + 1)
            }
            StmtKind::Exp(exp) => {
                node(sink, depth, "stmt exp", exp.ty.name())?;
                exp.serialize(sink, depth + 1)
            }
        }
    }
}

impl Serialize for Func {
    fn serialize(&self, sink: &mut dyn Write, depth: usize) -> fmt::Result {
        let label = if self.is_rec { "func rec" } else { "func" };
        writeln!(sink, "{}+ {} [{}]", "  ".repeat(depth), label, self.signature)?;
        field(sink, depth + 1, "name", &self.symbol.name)?;
        for param in &self.params {
            field(sink, depth + 1, "param", &format!("{} [{}]", param.name, param.ty))?;
        }
        self.body.serialize(sink, depth + 1)
    }
}

impl Serialize for Binding {
    fn serialize(&self, sink: &mut dyn Write, depth: usize) -> fmt::Result {
        match self {
            Binding::Var { symbol, value } => {
                node(sink, depth, "binding", symbol.ty.name())?;
                field(sink, depth + 1, "name", &symbol.name)?;
                value.serialize(sink, depth + 1)
            }
            Binding::Func(func) => func.serialize(sink, depth),
        }
    }
}

impl Serialize for Exp {
    fn serialize(&self, sink: &mut dyn Write, depth: usize) -> fmt::Result {
        match &self.head {
            Some(head) => {
                node(sink, depth, "exp apply", self.ty.name())?;
                field(sink, depth + 1, "fun", &head.symbol.name)?;
            }
            None => node(sink, depth, "exp", self.ty.name())?,
        }

        for item in &self.items {
            item.serialize(sink, depth + 1)?;
        }
        Ok(())
    }
}

impl Serialize for Expb {
    fn serialize(&self, sink: &mut dyn Write, depth: usize) -> fmt::Result {
        let ty = self.ty();
        match self {
            Expb::Binary { op, lhs, rhs, .. } => {
                node(sink, depth, "binary", ty.name())?;
                field(sink, depth + 1, "op", &op.value)?;
                lhs.serialize(sink, depth + 1)?;
                rhs.serialize(sink, depth + 1)
            }
            Expb::Unary { op, operand, .. } => {
                node(sink, depth, "unary", ty.name())?;
                field(sink, depth + 1, "op", &op.value)?;
                operand.serialize(sink, depth + 1)
            }
            Expb::Cons { first, second, .. } => {
                node(sink, depth, "cons", ty.name())?;
                first.serialize(sink, depth + 1)?;
                second.serialize(sink, depth + 1)
            }
            Expb::Fst { first, second, .. } => {
                node(sink, depth, "fst", ty.name())?;
                first.serialize(sink, depth + 1)?;
                second.serialize(sink, depth + 1)
            }
            Expb::Snd { first, second, .. } => {
                node(sink, depth, "snd", ty.name())?;
                first.serialize(sink, depth + 1)?;
                second.serialize(sink, depth + 1)
            }
            Expb::Compound { first, second, .. } => {
                node(sink, depth, "compound", ty.name())?;
                first.serialize(sink, depth + 1)?;
                second.serialize(sink, depth + 1)
            }
            Expb::Atom(atom) => atom.serialize(sink, depth),
        }
    }
}

impl Serialize for Expa {
    fn serialize(&self, sink: &mut dyn Write, depth: usize) -> fmt::Result {
        let ty = self.ty();
        match self {
            Expa::Var(var) => {
                node(sink, depth, "var", ty.name())?;
                field(sink, depth + 1, "name", &var.symbol.name)
            }
            Expa::Constant(constant) => constant.serialize(sink, depth),
            Expa::If { cond, then, els, .. } => {
                node(sink, depth, "if", ty.name())?;
                cond.serialize(sink, depth + 1)?;
                then.serialize(sink, depth + 1)?;
                match els {
                    Some(els) => els.serialize(sink, depth + 1),
                    None => Ok(()),
                }
            }
            Expa::While { cond, body, .. } => {
                node(sink, depth, "while", ty.name())?;
                cond.serialize(sink, depth + 1)?;
                body.serialize(sink, depth + 1)
            }
            Expa::Let { bindings, body, .. } => {
                node(sink, depth, "let", ty.name())?;
                for binding in bindings {
                    binding.serialize(sink, depth + 1)?;
                }
                body.serialize(sink, depth + 1)
            }
            Expa::Call(call) => {
                node(sink, depth, "call", ty.name())?;
                field(sink, depth + 1, "fun", &call.callee.name)?;
                for arg in &call.args {
                    arg.serialize(sink, depth + 1)?;
                }
                Ok(())
            }
            Expa::Paren { inner, .. } => {
                node(sink, depth, "paren", ty.name())?;
                inner.serialize(sink, depth + 1)
            }
        }
    }
}

impl Serialize for Constant {
    fn serialize(&self, sink: &mut dyn Write, depth: usize) -> fmt::Result {
        node(sink, depth, "constant", self.ty.name())?;
        match &self.value {
            ConstantValue::Int(value) => field(sink, depth + 1, "value", value),
            ConstantValue::Float(value) => field(sink, depth + 1, "value", value),
            ConstantValue::Bool(value) => field(sink, depth + 1, "value", value),
            ConstantValue::String(value) => field(sink, depth + 1, "value", &format!("{:?}", value)),
            ConstantValue::Unit => field(sink, depth + 1, "value", &"()"),
        }
    }
}
