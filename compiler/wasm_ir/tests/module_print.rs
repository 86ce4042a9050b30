//! End-to-end printing of whole modules built through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use smallvec::smallvec;
use wasm_ir::{
    BasicType, BinaryOp, Export, Expr, Function, FunctionType, Import, IrError, Literal,
    LocalVar, Module, NameType, PrintConfig, Table, Var,
};

/// `add(a, b) = a + b`, exported and placed in the table.
fn add_module() -> Module {
    let mut module = Module::new();
    module
        .append_type(FunctionType::new(
            [BasicType::I32, BasicType::I32],
            BasicType::I32,
        ))
        .unwrap();

    let add = module.intern("add");
    let a = module.intern("a");
    let b = module.intern("b");

    let left = module.alloc(Expr::GetLocal {
        local: LocalVar::Index(0),
    });
    let right = module.alloc(Expr::GetLocal {
        local: LocalVar::Index(1),
    });
    let sum = Expr::binary(BinaryOp::Add, BasicType::I32, left, right).unwrap();
    let body = module.alloc(sum);

    let mut func = Function::new(Some(add), BasicType::I32, body);
    func.params.push(NameType::new(a, BasicType::I32));
    func.params.push(NameType::new(b, BasicType::I32));
    let id = module.append_function(func).unwrap();

    module.append_export(Export { name: add, value: id }).unwrap();
    module.set_table(Table::new([id])).unwrap();
    module
}

#[test]
fn add_function_module() {
    let module = add_module();
    assert_eq!(
        module.print(),
        "(module\n\
         \x20 (type 1 (param i32) (param i32) (result i32))\n\
         \x20 (export \"add\" add)\n\
         \x20 (table add)\n\
         \x20 (func add (param a i32) (param b i32) (result i32)\n\
         \x20   (binary add i32\n\
         \x20     (getlocal 0)\n\
         \x20     (getlocal 1)\n\
         \x20   )\n\
         \x20 )\n\
         )\n"
    );
}

#[test]
fn add_function_module_wide_indent() {
    let module = add_module();
    let text = module.print_with(PrintConfig::with_indent_size(4));
    assert!(text.contains("\n    (table add)\n"));
    assert!(text.contains("\n            (getlocal 1)\n"));
}

#[test]
fn import_with_signature() {
    let mut module = Module::new();
    let print = module.intern("print");
    let env = module.intern("env");
    module
        .append_import(Import {
            name: print,
            module: env,
            base: print,
            ty: FunctionType::new([BasicType::I32], BasicType::None),
        })
        .unwrap();
    assert_eq!(
        module.print(),
        "(module\n\
         \x20 (import print \"env\" \"print\" (param i32) (result none))\n\
         \x20 (table)\n\
         )\n"
    );
}

#[test]
fn call_import_from_function() {
    let mut module = Module::new();
    let print = module.intern("print");
    let env = module.intern("env");
    let target = module
        .append_import(Import {
            name: print,
            module: env,
            base: print,
            ty: FunctionType::new([BasicType::I32], BasicType::None),
        })
        .unwrap();

    let arg = module.alloc(Expr::Const(Literal::I32(42)));
    let call = module.alloc(Expr::CallImport {
        target,
        operands: smallvec![arg],
    });
    let body = module.alloc(Expr::Block {
        label: Var::Unset,
        list: smallvec![call],
    });
    module
        .append_function(Function::new(None, BasicType::None, body))
        .unwrap();

    assert_eq!(
        module.print(),
        "(module\n\
         \x20 (import print \"env\" \"print\" (param i32) (result none))\n\
         \x20 (table)\n\
         \x20 (func 1 (result none)\n\
         \x20   (block\n\
         \x20     (callimport print\n\
         \x20       (literal i32 42)\n\
         \x20     )\n\
         \x20   )\n\
         \x20 )\n\
         )\n"
    );
}

#[test]
fn locals_print_before_body() {
    let mut module = Module::new();
    let tmp = module.intern("tmp");
    let value = module.alloc(Expr::Const(Literal::F64(1.5)));
    let body = module.alloc(Expr::SetLocal {
        local: LocalVar::Named(tmp),
        value,
    });
    let mut func = Function::new(None, BasicType::None, body);
    func.locals.push(NameType::new(tmp, BasicType::F64));
    module.append_function(func).unwrap();

    assert_eq!(
        module.print(),
        "(module\n\
         \x20 (table)\n\
         \x20 (func 1 (result none)\n\
         \x20   (local tmp f64)\n\
         \x20   (setlocal tmp\n\
         \x20     (literal f64 1.5)\n\
         \x20   )\n\
         \x20 )\n\
         )\n"
    );
}

#[test]
fn operator_domain_checked_before_allocation() {
    let mut module = Module::new();
    let x = module.alloc(Expr::Const(Literal::F32(1.0)));
    let y = module.alloc(Expr::Const(Literal::F32(2.0)));
    assert_eq!(
        Expr::binary(BinaryOp::And, BasicType::F32, x, y),
        Err(IrError::OperatorDomain {
            op: "and",
            ty: BasicType::F32,
        })
    );
    assert_eq!(module.exprs().len(), 2);
}

#[test]
fn declaration_kinds_share_one_index_space() {
    let mut module = Module::new();
    let ty = module
        .append_type(FunctionType::new(Vec::<BasicType>::new(), BasicType::None))
        .unwrap();
    let body = module.alloc(Expr::Nop);
    let func = module
        .append_function(Function::new(None, BasicType::None, body))
        .unwrap();
    let table = module.set_table(Table::new([func])).unwrap();
    assert_eq!(ty, Var::index(1).unwrap());
    assert_eq!(func, Var::index(2).unwrap());
    assert_eq!(table, Var::index(3).unwrap());
}
