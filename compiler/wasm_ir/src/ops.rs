//! Operator catalog.
//!
//! Four closed enumerations mirror the instruction families of the target
//! machine, plus host queries. Every operator declares the value domain it
//! is defined on; node constructors reject operators used outside it.

use crate::BasicType;

/// Value domain an operator is defined on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpDomain {
    /// `i32` or `i64`.
    Int,
    /// `f32` or `f64`.
    Float,
    /// Any of the four value types.
    Any,
}

impl OpDomain {
    /// Whether `ty` belongs to this domain. `none` belongs to none.
    pub const fn contains(self, ty: BasicType) -> bool {
        match self {
            OpDomain::Int => ty.is_int(),
            OpDomain::Float => ty.is_float(),
            OpDomain::Any => ty.is_int() || ty.is_float(),
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    // Int
    Clz,
    Ctz,
    Popcnt,
    // Float
    Neg,
    Abs,
    Ceil,
    Floor,
    Trunc,
    Nearest,
    Sqrt,
}

impl UnaryOp {
    /// Text token used by the printer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clz => "clz",
            Self::Ctz => "ctz",
            Self::Popcnt => "popcnt",
            Self::Neg => "neg",
            Self::Abs => "abs",
            Self::Ceil => "ceil",
            Self::Floor => "floor",
            Self::Trunc => "trunc",
            Self::Nearest => "nearest",
            Self::Sqrt => "sqrt",
        }
    }

    pub const fn domain(self) -> OpDomain {
        match self {
            Self::Clz | Self::Ctz | Self::Popcnt => OpDomain::Int,
            Self::Neg
            | Self::Abs
            | Self::Ceil
            | Self::Floor
            | Self::Trunc
            | Self::Nearest
            | Self::Sqrt => OpDomain::Float,
        }
    }
}

/// Binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Int or float
    Add,
    Sub,
    Mul,
    // Int
    DivS,
    DivU,
    RemS,
    RemU,
    And,
    Or,
    Xor,
    Shl,
    ShrU,
    ShrS,
    // Float
    Div,
    CopySign,
    Min,
    Max,
}

impl BinaryOp {
    /// Text token used by the printer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::DivS => "divs",
            Self::DivU => "divu",
            Self::RemS => "rems",
            Self::RemU => "remu",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Shl => "shl",
            Self::ShrU => "shru",
            Self::ShrS => "shrs",
            Self::Div => "div",
            Self::CopySign => "copysign",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    pub const fn domain(self) -> OpDomain {
        match self {
            Self::Add | Self::Sub | Self::Mul => OpDomain::Any,
            Self::DivS
            | Self::DivU
            | Self::RemS
            | Self::RemU
            | Self::And
            | Self::Or
            | Self::Xor
            | Self::Shl
            | Self::ShrU
            | Self::ShrS => OpDomain::Int,
            Self::Div | Self::CopySign | Self::Min | Self::Max => OpDomain::Float,
        }
    }
}

/// Comparison operators. The result is always `i32`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationalOp {
    // Int or float
    Eq,
    Ne,
    // Int
    LtS,
    LtU,
    LeS,
    LeU,
    GtS,
    GtU,
    GeS,
    GeU,
    // Float
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelationalOp {
    /// Text token used by the printer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::LtS => "lts",
            Self::LtU => "ltu",
            Self::LeS => "les",
            Self::LeU => "leu",
            Self::GtS => "gts",
            Self::GtU => "gtu",
            Self::GeS => "ges",
            Self::GeU => "geu",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Gt => "gt",
            Self::Ge => "ge",
        }
    }

    pub const fn domain(self) -> OpDomain {
        match self {
            Self::Eq | Self::Ne => OpDomain::Any,
            Self::LtS
            | Self::LtU
            | Self::LeS
            | Self::LeU
            | Self::GtS
            | Self::GtU
            | Self::GeS
            | Self::GeU => OpDomain::Int,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => OpDomain::Float,
        }
    }
}

/// Conversion operators, classified by their result type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvertOp {
    // Int result
    ExtendSInt32,
    ExtendUInt32,
    WrapInt64,
    TruncSFloat32,
    TruncUFloat32,
    TruncSFloat64,
    TruncUFloat64,
    ReinterpretFloat,
    // Float result
    ConvertSInt32,
    ConvertUInt32,
    ConvertSInt64,
    ConvertUInt64,
    PromoteFloat32,
    DemoteFloat64,
    ReinterpretInt,
}

impl ConvertOp {
    /// Text token used by the printer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExtendSInt32 => "extends/i32",
            Self::ExtendUInt32 => "extendu/i32",
            Self::WrapInt64 => "wrap/i64",
            Self::TruncSFloat32 => "truncs/f32",
            Self::TruncUFloat32 => "truncu/f32",
            Self::TruncSFloat64 => "truncs/f64",
            Self::TruncUFloat64 => "truncu/f64",
            Self::ReinterpretFloat => "reinterpret/float",
            Self::ConvertSInt32 => "converts/i32",
            Self::ConvertUInt32 => "convertu/i32",
            Self::ConvertSInt64 => "converts/i64",
            Self::ConvertUInt64 => "convertu/i64",
            Self::PromoteFloat32 => "promote/f32",
            Self::DemoteFloat64 => "demote/f64",
            Self::ReinterpretInt => "reinterpret/int",
        }
    }

    /// Domain of the result type.
    pub const fn domain(self) -> OpDomain {
        match self {
            Self::ExtendSInt32
            | Self::ExtendUInt32
            | Self::WrapInt64
            | Self::TruncSFloat32
            | Self::TruncUFloat32
            | Self::TruncSFloat64
            | Self::TruncUFloat64
            | Self::ReinterpretFloat => OpDomain::Int,
            Self::ConvertSInt32
            | Self::ConvertUInt32
            | Self::ConvertSInt64
            | Self::ConvertUInt64
            | Self::PromoteFloat32
            | Self::DemoteFloat64
            | Self::ReinterpretInt => OpDomain::Float,
        }
    }

    /// Result types this conversion can produce.
    pub const fn result_types(self) -> &'static [BasicType] {
        match self {
            Self::ExtendSInt32 | Self::ExtendUInt32 => &[BasicType::I64],
            Self::WrapInt64 => &[BasicType::I32],
            Self::PromoteFloat32 => &[BasicType::F64],
            Self::DemoteFloat64 => &[BasicType::F32],
            Self::TruncSFloat32
            | Self::TruncUFloat32
            | Self::TruncSFloat64
            | Self::TruncUFloat64
            | Self::ReinterpretFloat => &[BasicType::I32, BasicType::I64],
            Self::ConvertSInt32
            | Self::ConvertUInt32
            | Self::ConvertSInt64
            | Self::ConvertUInt64
            | Self::ReinterpretInt => &[BasicType::F32, BasicType::F64],
        }
    }

    /// Whether this conversion can produce `ty`.
    pub fn produces(self, ty: BasicType) -> bool {
        self.result_types().contains(&ty)
    }
}

/// Host queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum HostOp {
    PageSize,
    MemorySize,
    GrowMemory,
    HasFeature,
}

impl HostOp {
    /// Text token used by the printer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PageSize => "pagesize",
            Self::MemorySize => "memorysize",
            Self::GrowMemory => "growmemory",
            Self::HasFeature => "hasfeature",
        }
    }
}
