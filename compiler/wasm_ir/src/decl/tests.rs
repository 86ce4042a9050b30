#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use crate::{ExprId, StringInterner};

use super::*;

fn binary_sig() -> FunctionType {
    FunctionType::new([BasicType::I32, BasicType::I32], BasicType::I32)
}

#[test]
fn function_type_equality_is_reflexive_and_symmetric() {
    let a = binary_sig();
    let b = binary_sig();
    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
}

#[test]
fn function_type_equality_includes_name() {
    let mut names = StringInterner::new();
    let a = binary_sig().with_name(names.intern("$add"));
    let b = binary_sig().with_name(names.intern("$sub"));
    assert_ne!(a, b);
    assert_ne!(a, binary_sig());
    assert!(a.same_shape(&b));
}

#[test]
fn function_type_equality_is_order_sensitive() {
    let a = FunctionType::new([BasicType::I32, BasicType::F64], BasicType::None);
    let b = FunctionType::new([BasicType::F64, BasicType::I32], BasicType::None);
    assert_ne!(a, b);
    assert!(!a.same_shape(&b));
}

#[test]
fn function_type_equality_checks_result_and_arity() {
    let a = binary_sig();
    let b = FunctionType::new([BasicType::I32, BasicType::I32], BasicType::I64);
    let c = FunctionType::new([BasicType::I32], BasicType::I32);
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn function_signature_and_locals() {
    let mut names = StringInterner::new();
    let a = names.intern("a");
    let b = names.intern("b");
    let tmp = names.intern("tmp");

    let mut func = Function::new(None, BasicType::I32, ExprId::new(0));
    func.params = vec![NameType::new(a, BasicType::I32), NameType::new(b, BasicType::I32)];
    func.locals = vec![NameType::new(tmp, BasicType::F64)];

    assert_eq!(func.signature(), binary_sig());
    assert_eq!(func.local(LocalVar::Index(0)).map(|s| s.name), Some(a));
    assert_eq!(func.local(LocalVar::Index(2)).map(|s| s.ty), Some(BasicType::F64));
    assert_eq!(func.local(LocalVar::Index(3)), None);
    assert_eq!(func.local(LocalVar::Named(tmp)).map(|s| s.ty), Some(BasicType::F64));
}

#[test]
fn table_lookup() {
    let table = Table::new([Var::index(1).unwrap(), Var::index(2).unwrap()]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(1), Some(Var::index(2).unwrap()));
    assert_eq!(table.get(2), None);
    assert!(Table::default().is_empty());
}

#[test]
fn import_symbol_joins_module_and_base() {
    let mut names = StringInterner::new();
    let import = Import {
        name: names.intern("log"),
        module: names.intern("env"),
        base: names.intern("console_log"),
        ty: FunctionType::new([BasicType::I32], BasicType::None),
    };
    assert_eq!(import.symbol(&names), "env.console_log");
}
