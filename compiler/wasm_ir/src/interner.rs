//! String interner for symbolic names.
//!
//! Single-writer: the interner is owned by one [`Module`](crate::Module) and
//! grows during construction. Lookup is O(1) by slot index.

use rustc_hash::FxHashMap;

use super::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// More strings than a 32-bit handle can address.
    #[error("interner exceeded capacity: {count} strings, max is {max}", max = u32::MAX)]
    Overflow { count: usize },
}

/// Read-only access to interned strings.
///
/// The printer only needs lookups, so it takes this trait instead of the
/// concrete interner.
pub trait StringLookup {
    /// Look up the string for an interned name.
    fn lookup(&self, name: Name) -> &str;
}

/// Owned string interner.
///
/// Interning the same text twice yields the same [`Name`].
pub struct StringInterner {
    /// Map from string content to slot index.
    map: FxHashMap<Box<str>, u32>,
    /// Storage for string contents, indexed by `Name::index()`.
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned as
    /// [`Name::EMPTY`].
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert(Box::<str>::from(""), 0);
        Self {
            map,
            strings: vec![Box::from("")],
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&slot) = self.map.get(s) {
            return Ok(Name::from_raw(slot));
        }

        let slot = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        self.strings.push(Box::from(s));
        self.map.insert(Box::from(s), slot);
        Ok(Name::from_raw(slot))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity (over 4 billion strings).
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&mut self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Returns the name for `s` if it was interned before.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).map(|&slot| Name::from_raw(slot))
    }

    /// Look up the string for a Name.
    ///
    /// # Panics
    /// Panics if `name` was produced by a different interner and is out of
    /// bounds for this one.
    #[track_caller]
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Always `false`: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}
