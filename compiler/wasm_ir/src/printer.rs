//! Canonical text printer.
//!
//! Compound forms open with `(tag ...`, put every child on its own line one
//! level deeper, and close with `)` at the indentation the form was opened
//! at, with no newline after the `)`. Atomic forms (`nop`, `getlocal`,
//! `literal`, `label`) are a single inline token. The same tree always
//! prints the same text.

mod emitter;

use std::fmt;

pub use emitter::{Emitter, StringEmitter};

use crate::module::Declared;
use crate::{
    BasicType, Expr, ExprArena, ExprId, Function, FunctionType, Import, Module, Name, NameType,
    StringLookup, Table, Var,
};

/// Default indentation: two spaces per nesting level.
pub const INDENT_SIZE: usize = 2;

/// Printer configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PrintConfig {
    /// Spaces per nesting level.
    pub indent_size: usize,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent_size: INDENT_SIZE,
        }
    }
}

impl PrintConfig {
    /// Create a new config with the specified indent size.
    pub fn with_indent_size(indent_size: usize) -> Self {
        Self { indent_size }
    }
}

/// Recursive, indentation-tracking printer.
pub struct Printer<'a, E = StringEmitter> {
    exprs: &'a ExprArena,
    names: &'a dyn StringLookup,
    out: E,
    indent: usize,
}

impl<'a> Printer<'a, StringEmitter> {
    pub fn new(exprs: &'a ExprArena, names: &'a dyn StringLookup) -> Self {
        Self::with_config(exprs, names, PrintConfig::default())
    }

    pub fn with_config(
        exprs: &'a ExprArena,
        names: &'a dyn StringLookup,
        config: PrintConfig,
    ) -> Self {
        Printer::with_emitter(exprs, names, StringEmitter::with_indent_size(config.indent_size))
    }

    /// The text printed so far.
    pub fn finish(self) -> String {
        self.out.output()
    }
}

impl<'a, E: Emitter> Printer<'a, E> {
    pub fn with_emitter(exprs: &'a ExprArena, names: &'a dyn StringLookup, out: E) -> Self {
        Printer {
            exprs,
            names,
            out,
            indent: 0,
        }
    }

    // ===== Protocol =====

    fn word(&mut self, args: fmt::Arguments<'_>) {
        self.out.emit(&args.to_string());
    }

    fn var(&mut self, var: Var) {
        let names = self.names;
        self.word(format_args!("{}", var.display(names)));
    }

    /// Finish the opening line of a compound form.
    fn open(&mut self) {
        self.out.emit_newline();
        self.indent += 1;
    }

    /// Emit the closing delimiter at the restored indentation.
    fn close(&mut self) {
        self.indent -= 1;
        self.out.emit_indent(self.indent);
        self.out.emit(")");
    }

    fn full_line(&mut self, id: ExprId) {
        self.out.emit_indent(self.indent);
        self.expr(id);
        self.out.emit_newline();
    }

    fn lines(&mut self, ids: &[ExprId]) {
        for &id in ids {
            self.full_line(id);
        }
    }

    // ===== Expressions =====

    /// Print the expression tree rooted at `id`, starting at the current
    /// column.
    pub fn expr(&mut self, id: ExprId) {
        let (exprs, names) = (self.exprs, self.names);
        match exprs.get(id) {
            Expr::Nop => self.out.emit("nop"),
            Expr::Block { label, list } => {
                self.out.emit("(block");
                if label.is_set() {
                    self.out.emit_space();
                    self.var(*label);
                }
                self.open();
                self.lines(list);
                self.close();
            }
            Expr::If {
                condition,
                if_true,
                if_false,
            } => {
                self.out.emit("(if");
                self.open();
                self.full_line(*condition);
                self.full_line(*if_true);
                if let Some(if_false) = if_false {
                    self.full_line(*if_false);
                }
                self.close();
            }
            Expr::Loop { out, inner, body } => {
                self.out.emit("(loop");
                // A continue target is only printed after a break target.
                if out.is_set() {
                    self.out.emit_space();
                    self.var(*out);
                    if inner.is_set() {
                        self.out.emit_space();
                        self.var(*inner);
                    }
                }
                self.open();
                self.full_line(*body);
                self.close();
            }
            Expr::Label { var } => {
                self.out.emit("(label ");
                self.var(*var);
                self.out.emit(")");
            }
            Expr::Break {
                target,
                condition,
                value,
            } => {
                self.out.emit("(break ");
                self.var(*target);
                self.open();
                if let Some(condition) = condition {
                    self.full_line(*condition);
                }
                if let Some(value) = value {
                    self.full_line(*value);
                }
                self.close();
            }
            Expr::Switch(switch) => {
                self.out.emit("(switch ");
                self.var(switch.target);
                self.open();
                self.full_line(switch.value);
                for case in &switch.cases {
                    self.out.emit_indent(self.indent);
                    self.word(format_args!("(case {}", case.value));
                    if case.fallthrough {
                        self.out.emit(" fallthrough");
                    }
                    self.open();
                    self.full_line(case.body);
                    self.close();
                    self.out.emit_newline();
                }
                self.out.emit_indent(self.indent);
                self.out.emit("(default");
                self.open();
                self.full_line(switch.default);
                self.close();
                self.out.emit_newline();
                self.close();
            }
            Expr::Call { target, operands } => {
                self.out.emit("(call ");
                self.var(*target);
                self.open();
                self.lines(operands);
                self.close();
            }
            Expr::CallImport { target, operands } => {
                self.out.emit("(callimport ");
                self.var(*target);
                self.open();
                self.lines(operands);
                self.close();
            }
            Expr::CallIndirect { target, operands } => {
                self.out.emit("(callindirect");
                self.open();
                self.full_line(*target);
                self.lines(operands);
                self.close();
            }
            Expr::GetLocal { local } => {
                self.word(format_args!("(getlocal {})", local.display(names)));
            }
            Expr::SetLocal { local, value } => {
                self.word(format_args!("(setlocal {}", local.display(names)));
                self.open();
                self.full_line(*value);
                self.close();
            }
            Expr::Load(load) => {
                let sign = if load.signed { "s" } else { "u" };
                self.word(format_args!(
                    "(load {} {} {} {}",
                    load.bytes, sign, load.offset, load.align
                ));
                self.open();
                self.full_line(load.ptr);
                self.close();
            }
            Expr::Store(store) => {
                self.word(format_args!(
                    "(store {} {} {}",
                    store.bytes, store.offset, store.align
                ));
                self.open();
                self.full_line(store.ptr);
                self.full_line(store.value);
                self.close();
            }
            Expr::Const(literal) => {
                self.word(format_args!("(literal {} {literal})", literal.ty()));
            }
            Expr::Unary { op, ty, value } => {
                check_domain(op.as_str(), *ty, op.domain().contains(*ty));
                self.word(format_args!("(unary {} {ty}", op.as_str()));
                self.open();
                self.full_line(*value);
                self.close();
            }
            Expr::Binary {
                op,
                ty,
                left,
                right,
            } => {
                check_domain(op.as_str(), *ty, op.domain().contains(*ty));
                self.word(format_args!("(binary {} {ty}", op.as_str()));
                self.open();
                self.full_line(*left);
                self.full_line(*right);
                self.close();
            }
            Expr::Compare {
                op,
                ty,
                left,
                right,
            } => {
                check_domain(op.as_str(), *ty, op.domain().contains(*ty));
                self.word(format_args!("(compare {} {ty}", op.as_str()));
                self.open();
                self.full_line(*left);
                self.full_line(*right);
                self.close();
            }
            Expr::Convert { op, ty, value } => {
                check_domain(op.as_str(), *ty, op.produces(*ty));
                self.word(format_args!("(convert {} {ty}", op.as_str()));
                self.open();
                self.full_line(*value);
                self.close();
            }
            Expr::Host { op, operands } => {
                self.word(format_args!("(host {}", op.as_str()));
                self.open();
                self.lines(operands);
                self.close();
            }
        }
    }

    // ===== Declarations =====

    fn params_and_result(&mut self, params: &[NameType], result: BasicType) {
        let names = self.names;
        for param in params {
            self.word(format_args!(
                " (param {} {})",
                names.lookup(param.name),
                param.ty
            ));
        }
        self.word(format_args!(" (result {result})"));
    }

    fn signature(&mut self, ty: &FunctionType) {
        for param in &ty.params {
            self.word(format_args!(" (param {param})"));
        }
        self.word(format_args!(" (result {})", ty.result));
    }

    /// `(type <id> (param <type>)* (result <type>))`
    pub fn function_type(&mut self, id: Var, ty: &FunctionType) {
        self.out.emit("(type ");
        self.var(id);
        self.signature(ty);
        self.out.emit(")");
    }

    /// `(import <name> "<module>" "<base>" (param <type>)* (result <type>))`.
    /// The quoted strings are escaped.
    pub fn import(&mut self, import: &Import) {
        let names = self.names;
        self.word(format_args!(
            "(import {} \"{}\" \"{}\"",
            names.lookup(import.name),
            names.lookup(import.module).escape_default(),
            names.lookup(import.base).escape_default(),
        ));
        self.signature(&import.ty);
        self.out.emit(")");
    }

    /// `(export "<name>" <id>)`, with the name escaped.
    pub fn export(&mut self, name: Name, value: Var) {
        let names = self.names;
        self.word(format_args!(
            "(export \"{}\" ",
            names.lookup(name).escape_default()
        ));
        self.var(value);
        self.out.emit(")");
    }

    /// `(table <id>*)`
    pub fn table(&mut self, table: &Table) {
        self.out.emit("(table");
        for &var in &table.vars {
            self.out.emit_space();
            self.var(var);
        }
        self.out.emit(")");
    }

    /// `(func <id> (param <name> <type>)* (result <type>)`, then one line per
    /// local and the body.
    pub fn function(&mut self, id: Var, function: &Function) {
        self.out.emit("(func ");
        self.var(id);
        self.params_and_result(&function.params, function.result);
        self.open();
        let names = self.names;
        for local in &function.locals {
            self.out.emit_indent(self.indent);
            self.word(format_args!(
                "(local {} {})",
                names.lookup(local.name),
                local.ty
            ));
            self.out.emit_newline();
        }
        self.full_line(function.body);
        self.close();
    }

    /// Whole module: types, imports sorted by name, exports, table,
    /// functions. Ends with a newline.
    pub fn module(&mut self, module: &Module) {
        tracing::trace!(
            types = module.function_types().len(),
            imports = module.imports().len(),
            exports = module.exports().len(),
            functions = module.functions().len(),
            "printing module",
        );

        self.out.emit("(module");
        self.open();

        for Declared { id, item } in module.function_types() {
            self.out.emit_indent(self.indent);
            self.function_type(*id, item);
            self.out.emit_newline();
        }

        let names = self.names;
        let mut imports: Vec<&Import> = module.imports().iter().map(|d| &d.item).collect();
        imports.sort_by(|a, b| names.lookup(a.name).cmp(names.lookup(b.name)));
        for import in imports {
            self.out.emit_indent(self.indent);
            self.import(import);
            self.out.emit_newline();
        }

        for Declared { item, .. } in module.exports() {
            self.out.emit_indent(self.indent);
            self.export(item.name, item.value);
            self.out.emit_newline();
        }

        self.out.emit_indent(self.indent);
        self.table(module.table());
        self.out.emit_newline();

        for Declared { id, item } in module.functions() {
            self.out.emit_indent(self.indent);
            self.function(*id, item);
            self.out.emit_newline();
        }

        self.close();
        self.out.emit_newline();
    }
}

/// Operator nodes built without the checked constructors are only
/// validated here.
#[track_caller]
fn check_domain(op: &str, ty: BasicType, ok: bool) {
    assert!(ok, "operator `{op}` is not defined for `{ty}`");
}

/// Print a single expression tree with the default configuration.
pub fn print_expr(exprs: &ExprArena, names: &dyn StringLookup, id: ExprId) -> String {
    let mut printer = Printer::new(exprs, names);
    printer.expr(id);
    printer.finish()
}
