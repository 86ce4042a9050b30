//! Construction errors.
//!
//! Only contract violations a caller can reasonably detect and report are
//! errors. Broken internal invariants (printing an unset identifier, asking
//! for the width of `none`) panic instead.

use crate::{BasicType, Var};

/// Error raised while building IR.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// Numeric identifier outside `1..Var::MAX_INDEX`.
    #[error("numeric identifier {value} out of range (expected 1..{max})", max = Var::MAX_INDEX)]
    IndexOutOfRange { value: u32 },

    /// Operator used with a value type outside its domain.
    #[error("operator `{op}` is not defined for `{ty}`")]
    OperatorDomain { op: &'static str, ty: BasicType },

    /// The identifier is already bound to another declaration.
    #[error("identifier {var:?} is already bound")]
    DuplicateIdentifier { var: Var },

    /// An import with this key already exists.
    #[error("duplicate import `{name}`")]
    DuplicateImport { name: String },

    /// The fresh-identifier counter ran into the symbolic range.
    #[error("no numeric identifiers left (limit {max})", max = Var::MAX_INDEX)]
    IndexSpaceExhausted,
}
