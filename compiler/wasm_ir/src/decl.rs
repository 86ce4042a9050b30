//! Module-level declarations.

use crate::{BasicType, ExprId, LocalVar, Name, StringLookup, Var};

/// A named, typed slot (parameter or local).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NameType {
    pub name: Name,
    pub ty: BasicType,
}

impl NameType {
    pub const fn new(name: Name, ty: BasicType) -> Self {
        NameType { name, ty }
    }
}

/// Call signature.
///
/// Equality compares the declared name as well as the shape, so two
/// signatures `(i32) -> i32` declared under different names are unequal.
/// Use [`FunctionType::same_shape`] to compare shapes only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub name: Option<Name>,
    pub result: BasicType,
    pub params: Vec<BasicType>,
}

impl FunctionType {
    /// Anonymous signature.
    pub fn new(params: impl IntoIterator<Item = BasicType>, result: BasicType) -> Self {
        FunctionType {
            name: None,
            result,
            params: params.into_iter().collect(),
        }
    }

    /// Same signature under `name`.
    #[must_use]
    pub fn with_name(mut self, name: Name) -> Self {
        self.name = Some(name);
        self
    }

    /// Compare result and ordered parameters, ignoring the name.
    pub fn same_shape(&self, other: &FunctionType) -> bool {
        self.result == other.result && self.params == other.params
    }
}

/// Function definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Function {
    /// Declared name; when `None` the function is known by its numeric id.
    pub name: Option<Name>,
    pub result: BasicType,
    pub params: Vec<NameType>,
    pub locals: Vec<NameType>,
    pub body: ExprId,
}

impl Function {
    pub fn new(name: Option<Name>, result: BasicType, body: ExprId) -> Self {
        Function {
            name,
            result,
            params: Vec::new(),
            locals: Vec::new(),
            body,
        }
    }

    /// The signature of this function, anonymous.
    pub fn signature(&self) -> FunctionType {
        FunctionType::new(self.params.iter().map(|p| p.ty), self.result)
    }

    /// Resolve a local reference. Indices run over the parameters, then the
    /// locals; names match the first slot declared with that name.
    pub fn local(&self, local: LocalVar) -> Option<&NameType> {
        let mut slots = self.params.iter().chain(&self.locals);
        match local {
            LocalVar::Index(index) => slots.nth(usize::try_from(index).ok()?),
            LocalVar::Named(name) => slots.find(|slot| slot.name == name),
        }
    }
}

/// External function binding `module.base`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Import {
    /// Module-local key; unique within a module.
    pub name: Name,
    pub module: Name,
    pub base: Name,
    pub ty: FunctionType,
}

impl Import {
    /// The external symbol this import binds, `module.base`.
    pub fn symbol<L: StringLookup + ?Sized>(&self, names: &L) -> String {
        format!("{}.{}", names.lookup(self.module), names.lookup(self.base))
    }
}

/// Visibility binding of a declaration under an external name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Export {
    pub name: Name,
    pub value: Var,
}

/// Indirect-call jump table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Table {
    pub vars: Vec<Var>,
}

impl Table {
    pub fn new(vars: impl IntoIterator<Item = Var>) -> Self {
        Table {
            vars: vars.into_iter().collect(),
        }
    }

    /// Entry selected by a computed call index.
    pub fn get(&self, index: usize) -> Option<Var> {
        self.vars.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests;
