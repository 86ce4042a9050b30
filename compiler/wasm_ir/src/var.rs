//! Declaration identifiers.
//!
//! A [`Var`] references a block, loop, function, type or import either by a
//! dense numeric index or by an interned symbolic name. The two forms are
//! separate variants; a third variant marks the unset default.

use std::fmt;

use crate::{IrError, Name, StringLookup};

/// Reference to a declaration.
///
/// Ordering compares the variant first (`Unset < Index < Named`), then the
/// payload, so `Var` can key ordered maps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Var {
    /// No identifier. Only produced by `Default`.
    #[default]
    Unset,
    /// Numeric index in `1..Var::MAX_INDEX`.
    Index(u32),
    /// Symbolic name.
    Named(Name),
}

impl Var {
    /// Upper bound (exclusive) of the numeric space.
    pub const MAX_INDEX: u32 = 1_000_000;

    /// Build a numeric identifier.
    pub fn index(value: u32) -> Result<Self, IrError> {
        if value == 0 || value >= Self::MAX_INDEX {
            return Err(IrError::IndexOutOfRange { value });
        }
        Ok(Var::Index(value))
    }

    /// Build a symbolic identifier.
    pub const fn named(name: Name) -> Self {
        Var::Named(name)
    }

    /// Returns `true` unless this is the unset default.
    #[inline]
    pub const fn is_set(self) -> bool {
        !matches!(self, Var::Unset)
    }

    /// Numeric payload, if this is a numeric identifier.
    pub const fn as_index(self) -> Option<u32> {
        match self {
            Var::Index(value) => Some(value),
            _ => None,
        }
    }

    /// Name payload, if this is a symbolic identifier.
    pub const fn as_name(self) -> Option<Name> {
        match self {
            Var::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Display adapter resolving names through `names`.
    pub fn display<'a, L: StringLookup + ?Sized>(self, names: &'a L) -> VarDisplay<'a, L> {
        VarDisplay { var: self, names }
    }
}

/// Renders a [`Var`] as its decimal index or its name text.
///
/// # Panics
/// Formatting an unset identifier panics: there is no text for it.
pub struct VarDisplay<'a, L: ?Sized> {
    var: Var,
    names: &'a L,
}

impl<L: StringLookup + ?Sized> fmt::Display for VarDisplay<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.var {
            Var::Unset => panic!("attempted to print an unset identifier"),
            Var::Index(value) => write!(f, "{value}"),
            Var::Named(name) => f.write_str(self.names.lookup(name)),
        }
    }
}

/// Reference to a parameter or local of the enclosing function.
///
/// Indices are zero-based and dense over the parameters followed by the
/// locals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalVar {
    Index(u32),
    Named(Name),
}

impl LocalVar {
    /// Display adapter resolving names through `names`.
    pub fn display<'a, L: StringLookup + ?Sized>(self, names: &'a L) -> LocalDisplay<'a, L> {
        LocalDisplay { local: self, names }
    }
}

/// Renders a [`LocalVar`].
pub struct LocalDisplay<'a, L: ?Sized> {
    local: LocalVar,
    names: &'a L,
}

impl<L: StringLookup + ?Sized> fmt::Display for LocalDisplay<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.local {
            LocalVar::Index(value) => write!(f, "{value}"),
            LocalVar::Named(name) => f.write_str(self.names.lookup(name)),
        }
    }
}
