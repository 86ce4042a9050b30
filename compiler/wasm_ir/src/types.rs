//! Value types and typed literals.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Primitive value type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BasicType {
    /// No value (e.g. the result of a function returning nothing).
    #[default]
    None,
    I32,
    I64,
    F32,
    F64,
}

impl BasicType {
    /// Canonical short token.
    pub const fn as_str(self) -> &'static str {
        match self {
            BasicType::None => "none",
            BasicType::I32 => "i32",
            BasicType::I64 => "i64",
            BasicType::F32 => "f32",
            BasicType::F64 => "f64",
        }
    }

    /// Width in bytes.
    ///
    /// # Panics
    /// `none` has no width; asking for it is a caller bug.
    #[track_caller]
    pub const fn size(self) -> u32 {
        match self {
            BasicType::None => panic!("`none` has no byte width"),
            BasicType::I32 | BasicType::F32 => 4,
            BasicType::I64 | BasicType::F64 => 8,
        }
    }

    pub const fn is_int(self) -> bool {
        matches!(self, BasicType::I32 | BasicType::I64)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, BasicType::F32 | BasicType::F64)
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed constant.
///
/// There is no `none` literal: the payload always matches one of the four
/// value types. Float literals compare and hash by bit pattern, so `NaN`
/// equals itself and `0.0 != -0.0`.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Literal {
    /// The zero value of `ty`.
    ///
    /// # Panics
    /// Panics for `BasicType::None`, which has no literal.
    #[track_caller]
    pub fn zero(ty: BasicType) -> Self {
        match ty {
            BasicType::None => panic!("cannot construct a `none` literal"),
            BasicType::I32 => Literal::I32(0),
            BasicType::I64 => Literal::I64(0),
            BasicType::F32 => Literal::F32(0.0),
            BasicType::F64 => Literal::F64(0.0),
        }
    }

    /// The value type of this literal. Never `BasicType::None`.
    pub const fn ty(self) -> BasicType {
        match self {
            Literal::I32(_) => BasicType::I32,
            Literal::I64(_) => BasicType::I64,
            Literal::F32(_) => BasicType::F32,
            Literal::F64(_) => BasicType::F64,
        }
    }

    /// Raw payload bits, zero-extended to 64 bits.
    #[allow(
        clippy::cast_sign_loss,
        reason = "bit reinterpretation of the integer payload"
    )]
    pub fn bits(self) -> u64 {
        match self {
            Literal::I32(v) => v as u32 as u64,
            Literal::I64(v) => v as u64,
            Literal::F32(v) => u64::from(v.to_bits()),
            Literal::F64(v) => v.to_bits(),
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.ty() == other.ty() && self.bits() == other.bits()
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty().hash(state);
        self.bits().hash(state);
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::I32(v)
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::I64(v)
    }
}

impl From<f32> for Literal {
    fn from(v: f32) -> Self {
        Literal::F32(v)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::F64(v)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::I32(v) => write!(f, "{v}"),
            Literal::I64(v) => write!(f, "{v}"),
            Literal::F32(v) => write!(f, "{v}"),
            Literal::F64(v) => write!(f, "{v}"),
        }
    }
}
