//! Expression nodes.
//!
//! Every instruction kind is one variant of the closed [`Expr`] enum.
//! Children are [`ExprId`] handles into the owning [`ExprArena`]; consumers
//! distinguish node kinds by matching on the enum (or on [`Expr::tag`]).
//!
//! [`ExprArena`]: crate::ExprArena

use smallvec::SmallVec;

use crate::{
    BasicType, BinaryOp, ConvertOp, HostOp, IrError, Literal, LocalVar, RelationalOp, UnaryOp,
    Var,
};

/// Handle to an expression in an [`ExprArena`](crate::ExprArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ExprId(u32);

crate::static_assert_size!(ExprId, 4);

impl ExprId {
    /// Create an ID from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Create an ID from an arena slot.
    ///
    /// # Panics
    /// Panics if the slot does not fit in 32 bits.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index)
            .unwrap_or_else(|_| panic!("expression arena exceeded {} nodes", u32::MAX));
        Self(raw)
    }

    /// Get the raw `u32` value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered list of child expressions.
pub type ExprList = SmallVec<[ExprId; 4]>;

/// Fieldless discriminant of [`Expr`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprTag {
    Nop,
    Block,
    If,
    Loop,
    Label,
    Break,
    Switch,
    Call,
    CallImport,
    CallIndirect,
    GetLocal,
    SetLocal,
    Load,
    Store,
    Const,
    Unary,
    Binary,
    Compare,
    Convert,
    Host,
}

impl ExprTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            ExprTag::Nop => "nop",
            ExprTag::Block => "block",
            ExprTag::If => "if",
            ExprTag::Loop => "loop",
            ExprTag::Label => "label",
            ExprTag::Break => "break",
            ExprTag::Switch => "switch",
            ExprTag::Call => "call",
            ExprTag::CallImport => "callimport",
            ExprTag::CallIndirect => "callindirect",
            ExprTag::GetLocal => "getlocal",
            ExprTag::SetLocal => "setlocal",
            ExprTag::Load => "load",
            ExprTag::Store => "store",
            ExprTag::Const => "const",
            ExprTag::Unary => "unary",
            ExprTag::Binary => "binary",
            ExprTag::Compare => "compare",
            ExprTag::Convert => "convert",
            ExprTag::Host => "host",
        }
    }
}

/// One arm of a [`Switch`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SwitchCase {
    /// Value compared (exactly) against the scrutinee.
    pub value: Literal,
    pub body: ExprId,
    /// Continue into the next case's body after this one.
    pub fallthrough: bool,
}

/// Multi-way branch on a literal value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Switch {
    pub target: Var,
    /// Scrutinee.
    pub value: ExprId,
    pub cases: Vec<SwitchCase>,
    pub default: ExprId,
}

impl Switch {
    /// Bodies that run for `scrutinee`, in execution order.
    ///
    /// Cases are tried in declaration order. The first case whose value
    /// equals the scrutinee runs, followed by each next body while the
    /// running case has `fallthrough` set. Falling through the last case
    /// runs the default body. With no matching case only the default runs.
    pub fn executed_bodies(&self, scrutinee: Literal) -> Vec<ExprId> {
        let Some(start) = self.cases.iter().position(|case| case.value == scrutinee) else {
            return vec![self.default];
        };

        let mut bodies = Vec::new();
        for case in &self.cases[start..] {
            bodies.push(case.body);
            if !case.fallthrough {
                return bodies;
            }
        }
        bodies.push(self.default);
        bodies
    }
}

/// Memory read.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Load {
    /// Access width in bytes.
    pub bytes: u32,
    /// Sign-extend narrow reads.
    pub signed: bool,
    pub offset: i32,
    /// Alignment hint in bytes.
    pub align: u32,
    pub ptr: ExprId,
}

/// Memory write.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Store {
    /// Access width in bytes.
    pub bytes: u32,
    pub offset: i32,
    /// Alignment hint in bytes.
    pub align: u32,
    pub ptr: ExprId,
    pub value: ExprId,
}

/// Expression node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    Nop,

    /// Sequence; `label` is the branch target, `Var::Unset` if none.
    Block { label: Var, list: ExprList },

    If {
        condition: ExprId,
        if_true: ExprId,
        if_false: Option<ExprId>,
    },

    /// `out` is the break target, `inner` the continue target.
    Loop { out: Var, inner: Var, body: ExprId },

    /// Structural branch-target marker.
    Label { var: Var },

    Break {
        target: Var,
        condition: Option<ExprId>,
        value: Option<ExprId>,
    },

    Switch(Switch),

    /// Call of a module-local function.
    Call { target: Var, operands: ExprList },

    /// Call of an imported function.
    CallImport { target: Var, operands: ExprList },

    /// Call through the table; `target` computes the table index.
    CallIndirect { target: ExprId, operands: ExprList },

    GetLocal { local: LocalVar },

    SetLocal { local: LocalVar, value: ExprId },

    Load(Load),

    Store(Store),

    Const(Literal),

    /// `ty` is the operand (and result) type.
    Unary {
        op: UnaryOp,
        ty: BasicType,
        value: ExprId,
    },

    /// `ty` is the operand (and result) type.
    Binary {
        op: BinaryOp,
        ty: BasicType,
        left: ExprId,
        right: ExprId,
    },

    /// `ty` is the operand type; the result is `i32`.
    Compare {
        op: RelationalOp,
        ty: BasicType,
        left: ExprId,
        right: ExprId,
    },

    /// `ty` is the result type.
    Convert {
        op: ConvertOp,
        ty: BasicType,
        value: ExprId,
    },

    Host { op: HostOp, operands: ExprList },
}

impl Expr {
    /// Unary node, checking `op` is defined for `ty`.
    pub fn unary(op: UnaryOp, ty: BasicType, value: ExprId) -> Result<Self, IrError> {
        if !op.domain().contains(ty) {
            return Err(IrError::OperatorDomain {
                op: op.as_str(),
                ty,
            });
        }
        Ok(Expr::Unary { op, ty, value })
    }

    /// Binary node, checking `op` is defined for `ty`.
    pub fn binary(
        op: BinaryOp,
        ty: BasicType,
        left: ExprId,
        right: ExprId,
    ) -> Result<Self, IrError> {
        if !op.domain().contains(ty) {
            return Err(IrError::OperatorDomain {
                op: op.as_str(),
                ty,
            });
        }
        Ok(Expr::Binary {
            op,
            ty,
            left,
            right,
        })
    }

    /// Comparison node, checking `op` is defined for operand type `ty`.
    pub fn compare(
        op: RelationalOp,
        ty: BasicType,
        left: ExprId,
        right: ExprId,
    ) -> Result<Self, IrError> {
        if !op.domain().contains(ty) {
            return Err(IrError::OperatorDomain {
                op: op.as_str(),
                ty,
            });
        }
        Ok(Expr::Compare {
            op,
            ty,
            left,
            right,
        })
    }

    /// Conversion node, checking `op` can produce result type `ty`.
    pub fn convert(op: ConvertOp, ty: BasicType, value: ExprId) -> Result<Self, IrError> {
        if !op.produces(ty) {
            return Err(IrError::OperatorDomain {
                op: op.as_str(),
                ty,
            });
        }
        Ok(Expr::Convert { op, ty, value })
    }

    /// Node kind.
    pub const fn tag(&self) -> ExprTag {
        match self {
            Expr::Nop => ExprTag::Nop,
            Expr::Block { .. } => ExprTag::Block,
            Expr::If { .. } => ExprTag::If,
            Expr::Loop { .. } => ExprTag::Loop,
            Expr::Label { .. } => ExprTag::Label,
            Expr::Break { .. } => ExprTag::Break,
            Expr::Switch(_) => ExprTag::Switch,
            Expr::Call { .. } => ExprTag::Call,
            Expr::CallImport { .. } => ExprTag::CallImport,
            Expr::CallIndirect { .. } => ExprTag::CallIndirect,
            Expr::GetLocal { .. } => ExprTag::GetLocal,
            Expr::SetLocal { .. } => ExprTag::SetLocal,
            Expr::Load(_) => ExprTag::Load,
            Expr::Store(_) => ExprTag::Store,
            Expr::Const(_) => ExprTag::Const,
            Expr::Unary { .. } => ExprTag::Unary,
            Expr::Binary { .. } => ExprTag::Binary,
            Expr::Compare { .. } => ExprTag::Compare,
            Expr::Convert { .. } => ExprTag::Convert,
            Expr::Host { .. } => ExprTag::Host,
        }
    }

    /// Direct children in print order.
    pub fn children(&self) -> ExprList {
        let mut out = ExprList::new();
        match self {
            Expr::Nop | Expr::Label { .. } | Expr::GetLocal { .. } | Expr::Const(_) => {}
            Expr::Block { list, .. } => out.extend_from_slice(list),
            Expr::If {
                condition,
                if_true,
                if_false,
            } => {
                out.push(*condition);
                out.push(*if_true);
                out.extend(*if_false);
            }
            Expr::Loop { body, .. } => out.push(*body),
            Expr::Break {
                condition, value, ..
            } => {
                out.extend(*condition);
                out.extend(*value);
            }
            Expr::Switch(switch) => {
                out.push(switch.value);
                out.extend(switch.cases.iter().map(|case| case.body));
                out.push(switch.default);
            }
            Expr::Call { operands, .. }
            | Expr::CallImport { operands, .. }
            | Expr::Host { operands, .. } => out.extend_from_slice(operands),
            Expr::CallIndirect { target, operands } => {
                out.push(*target);
                out.extend_from_slice(operands);
            }
            Expr::SetLocal { value, .. }
            | Expr::Unary { value, .. }
            | Expr::Convert { value, .. } => out.push(*value),
            Expr::Load(load) => out.push(load.ptr),
            Expr::Store(store) => {
                out.push(store.ptr);
                out.push(store.value);
            }
            Expr::Binary { left, right, .. } | Expr::Compare { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
        }
        out
    }

    /// Atomic nodes print as one inline token with no child lines.
    pub const fn is_atomic(&self) -> bool {
        matches!(
            self,
            Expr::Nop | Expr::Label { .. } | Expr::GetLocal { .. } | Expr::Const(_)
        )
    }
}
