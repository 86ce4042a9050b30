//! Module container.
//!
//! A [`Module`] owns every declaration of one compilation unit together with
//! the expression arena and the string interner those declarations refer
//! to. Appending a declaration binds an identifier to it: the declared name
//! when there is one, otherwise a fresh numeric index.

use rustc_hash::FxHashMap;

use crate::printer::{PrintConfig, Printer};
use crate::{
    Export, Expr, ExprArena, ExprId, Function, FunctionType, Import, IrError, Name,
    StringInterner, Table, Var,
};

/// A declaration together with the identifier it is bound to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declared<T> {
    pub id: Var,
    pub item: T,
}

/// What an identifier resolves to. Indices are positions in the module's
/// declaration lists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclRef {
    FunctionType(usize),
    Import(usize),
    Export(usize),
    Table,
    Function(usize),
}

/// One compilation unit.
pub struct Module {
    names: StringInterner,
    exprs: ExprArena,

    function_types: Vec<Declared<FunctionType>>,
    /// Declaration order; printed name-sorted.
    imports: Vec<Declared<Import>>,
    import_index: FxHashMap<Name, usize>,
    exports: Vec<Declared<Export>>,
    table: Table,
    /// `Var::Unset` until a table is set.
    table_id: Var,
    functions: Vec<Declared<Function>>,

    map: FxHashMap<Var, DeclRef>,
    next_index: u32,
}

impl Module {
    pub fn new() -> Self {
        Module {
            names: StringInterner::new(),
            exprs: ExprArena::new(),
            function_types: Vec::new(),
            imports: Vec::new(),
            import_index: FxHashMap::default(),
            exports: Vec::new(),
            table: Table::default(),
            table_id: Var::Unset,
            functions: Vec::new(),
            map: FxHashMap::default(),
            next_index: 1,
        }
    }

    // ===== Construction =====

    /// Intern a name in this module's interner.
    pub fn intern(&mut self, s: &str) -> Name {
        self.names.intern(s)
    }

    /// Allocate an expression in this module's arena.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        self.exprs.alloc(expr)
    }

    /// Append a signature. Bound to its name, if any.
    pub fn append_type(&mut self, ty: FunctionType) -> Result<Var, IrError> {
        let id = self.bind(ty.name, DeclRef::FunctionType(self.function_types.len()))?;
        tracing::debug!(id = ?id, params = ty.params.len(), "function type appended");
        self.function_types.push(Declared { id, item: ty });
        Ok(id)
    }

    /// Append an import. Bound to its name, which must be unique among
    /// imports.
    pub fn append_import(&mut self, import: Import) -> Result<Var, IrError> {
        if self.import_index.contains_key(&import.name) {
            return Err(IrError::DuplicateImport {
                name: self.names.lookup(import.name).to_owned(),
            });
        }
        let index = self.imports.len();
        let id = self.bind(Some(import.name), DeclRef::Import(index))?;
        tracing::debug!(
            id = ?id,
            module = self.names.lookup(import.module),
            base = self.names.lookup(import.base),
            "import appended",
        );
        self.import_index.insert(import.name, index);
        self.imports.push(Declared { id, item: import });
        Ok(id)
    }

    /// Append an export. Always bound to a fresh numeric identifier.
    pub fn append_export(&mut self, export: Export) -> Result<Var, IrError> {
        let id = self.bind(None, DeclRef::Export(self.exports.len()))?;
        tracing::debug!(id = ?id, target = ?export.value, "export appended");
        self.exports.push(Declared { id, item: export });
        Ok(id)
    }

    /// Install the table. Replacing an existing table keeps its identifier.
    pub fn set_table(&mut self, table: Table) -> Result<Var, IrError> {
        if !self.table_id.is_set() {
            self.table_id = self.bind(None, DeclRef::Table)?;
        }
        tracing::debug!(id = ?self.table_id, entries = table.len(), "table set");
        self.table = table;
        Ok(self.table_id)
    }

    /// Append a function. Bound to its name, if any.
    pub fn append_function(&mut self, function: Function) -> Result<Var, IrError> {
        let id = self.bind(function.name, DeclRef::Function(self.functions.len()))?;
        tracing::debug!(
            id = ?id,
            locals = function.locals.len(),
            nodes = self.exprs.subtree_len(function.body),
            "function appended",
        );
        self.functions.push(Declared { id, item: function });
        Ok(id)
    }

    /// Pick the identifier for a new declaration and record it.
    fn bind(&mut self, name: Option<Name>, decl: DeclRef) -> Result<Var, IrError> {
        let var = match name {
            Some(name) => Var::named(name),
            None => self.fresh_index()?,
        };
        if self.map.contains_key(&var) {
            return Err(IrError::DuplicateIdentifier { var });
        }
        if name.is_none() {
            self.next_index += 1;
        }
        self.map.insert(var, decl);
        Ok(var)
    }

    fn fresh_index(&self) -> Result<Var, IrError> {
        if self.next_index >= Var::MAX_INDEX {
            return Err(IrError::IndexSpaceExhausted);
        }
        Var::index(self.next_index)
    }

    // ===== Resolution =====

    /// What `var` is bound to.
    pub fn resolve(&self, var: Var) -> Option<DeclRef> {
        self.map.get(&var).copied()
    }

    pub fn function_type(&self, var: Var) -> Option<&FunctionType> {
        match self.resolve(var)? {
            DeclRef::FunctionType(index) => Some(&self.function_types[index].item),
            _ => None,
        }
    }

    pub fn function(&self, var: Var) -> Option<&Function> {
        match self.resolve(var)? {
            DeclRef::Function(index) => Some(&self.functions[index].item),
            _ => None,
        }
    }

    pub fn function_mut(&mut self, var: Var) -> Option<&mut Function> {
        match self.resolve(var)? {
            DeclRef::Function(index) => Some(&mut self.functions[index].item),
            _ => None,
        }
    }

    /// Import by its key.
    pub fn import(&self, name: Name) -> Option<&Import> {
        let index = *self.import_index.get(&name)?;
        Some(&self.imports[index].item)
    }

    // ===== Accessors =====

    pub fn names(&self) -> &StringInterner {
        &self.names
    }

    pub fn names_mut(&mut self) -> &mut StringInterner {
        &mut self.names
    }

    pub fn exprs(&self) -> &ExprArena {
        &self.exprs
    }

    pub fn exprs_mut(&mut self) -> &mut ExprArena {
        &mut self.exprs
    }

    pub fn function_types(&self) -> &[Declared<FunctionType>] {
        &self.function_types
    }

    /// Imports in declaration order.
    pub fn imports(&self) -> &[Declared<Import>] {
        &self.imports
    }

    pub fn exports(&self) -> &[Declared<Export>] {
        &self.exports
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Identifier of the table, `Var::Unset` if none was set.
    pub fn table_id(&self) -> Var {
        self.table_id
    }

    pub fn functions(&self) -> &[Declared<Function>] {
        &self.functions
    }

    // ===== Printing =====

    /// Canonical text form with the default configuration.
    pub fn print(&self) -> String {
        self.print_with(PrintConfig::default())
    }

    pub fn print_with(&self, config: PrintConfig) -> String {
        let mut printer = Printer::with_config(&self.exprs, &self.names, config);
        printer.module(self);
        printer.finish()
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}
