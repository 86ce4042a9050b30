//! Wasm IR - in-memory representation of structured stack-machine modules
//!
//! This crate contains the object model every pass of the toolchain works
//! on, plus a canonical text printer:
//! - [`Arena`] / [`ExprArena`] for chunked node storage
//! - [`Var`] identifiers (numeric index or interned [`Name`])
//! - [`BasicType`], [`Literal`] and the operator catalog
//! - [`Expr`] nodes for every instruction kind
//! - Declarations ([`FunctionType`], [`Function`], [`Import`], [`Export`],
//!   [`Table`]) and the [`Module`] that owns them
//! - [`Printer`] for the parenthesized text form
//!
//! # Design
//!
//! - **Flat trees**: nodes live in an arena and reference children by
//!   [`ExprId`]; each id has at most one parent.
//! - **Closed variants**: node kinds, types and operators are enums, so
//!   every consumer matches exhaustively.
//! - **Intern names**: symbolic names are 32-bit handles resolved through
//!   the module's [`StringInterner`].
//!
//! Parsing, binary encoding, validation and optimization are left to
//! other crates that build or walk this representation.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod decl;
mod error;
mod expr;
mod interner;
mod module;
mod name;
mod ops;
pub mod printer;
mod types;
mod var;

pub use arena::{Arena, ExprArena, CHUNK_SIZE};
pub use decl::{Export, Function, FunctionType, Import, NameType, Table};
pub use error::IrError;
pub use expr::{Expr, ExprId, ExprList, ExprTag, Load, Store, Switch, SwitchCase};
pub use interner::{InternError, StringInterner, StringLookup};
pub use module::{DeclRef, Declared, Module};
pub use name::Name;
pub use ops::{BinaryOp, ConvertOp, HostOp, OpDomain, RelationalOp, UnaryOp};
pub use printer::{print_expr, PrintConfig, Printer};
pub use types::{BasicType, Literal};
pub use var::{LocalDisplay, LocalVar, Var, VarDisplay};
