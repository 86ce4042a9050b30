//! Chunked arena allocation.
//!
//! Storage is a list of fixed-byte-capacity chunks. Each chunk is a `Vec`
//! whose capacity is reserved up front and never exceeded, so values never
//! move once placed. When the current chunk is full a new one is appended.
//!
//! Values are owned by the arena: dropping or resetting it runs every
//! stored value's destructor. There is no per-value deallocation.

use std::fmt;
use std::mem;

use super::{Expr, ExprId, ExprList, Literal};

/// Byte capacity of a single chunk.
pub const CHUNK_SIZE: usize = 10_000;

/// Bump-style typed arena over fixed-size chunks.
pub struct Arena<T> {
    chunks: Vec<Vec<T>>,
    /// Number of `T` that fit in one chunk.
    per_chunk: usize,
    len: usize,
}

impl<T> Arena<T> {
    /// Create an empty arena.
    ///
    /// # Panics
    /// Panics if `T` is larger than [`CHUNK_SIZE`]; such a value could
    /// never be placed in a chunk.
    pub fn new() -> Self {
        let size = mem::size_of::<T>().max(1);
        assert!(
            size <= CHUNK_SIZE,
            "arena element of {size} bytes exceeds chunk size of {CHUNK_SIZE} bytes"
        );
        Arena {
            chunks: Vec::new(),
            per_chunk: CHUNK_SIZE / size,
            len: 0,
        }
    }

    /// Place `value` in the arena, returning its slot index.
    pub fn alloc(&mut self, value: T) -> usize {
        let full = self
            .chunks
            .last()
            .map_or(true, |chunk| chunk.len() >= self.per_chunk);
        if full {
            self.chunks.push(Vec::with_capacity(self.per_chunk));
            tracing::trace!(chunks = self.chunks.len(), "arena chunk appended");
        }
        let last = self.chunks.len() - 1;
        self.chunks[last].push(value);
        let index = self.len;
        self.len += 1;
        index
    }

    /// Place a default-constructed `T` and return a mutable reference to it.
    pub fn alloc_default(&mut self) -> &mut T
    where
        T: Default,
    {
        let index = self.alloc(T::default());
        self.get_mut(index)
    }

    /// Get a value by slot index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get(&self, index: usize) -> &T {
        &self.chunks[index / self.per_chunk][index % self.per_chunk]
    }

    /// Get a mutable value by slot index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self.chunks[index / self.per_chunk][index % self.per_chunk]
    }

    /// Number of values stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if arena is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of chunks currently allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of values one chunk holds.
    pub fn chunk_capacity(&self) -> usize {
        self.per_chunk
    }

    /// Iterate values in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.chunks.iter().flatten()
    }

    /// Drop every stored value and release all chunks.
    pub fn reset(&mut self) {
        self.chunks.clear();
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arena {{ {} values, {} chunks }}",
            self.len,
            self.chunks.len()
        )
    }
}

// ExprArena

/// Storage for every expression node of a module.
///
/// Nodes reference their children by [`ExprId`]. Construction hands each id
/// to exactly one parent, so the nodes form a forest of trees rooted at
/// function bodies.
#[derive(Default)]
pub struct ExprArena {
    exprs: Arena<Expr>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate expression, return ID.
    #[inline]
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let index = self.exprs.alloc(expr);
        ExprId::from_index(index)
    }

    /// Get expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get(&self, id: ExprId) -> &Expr {
        self.exprs.get(id.index())
    }

    /// Get mutable expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_mut(&mut self, id: ExprId) -> &mut Expr {
        self.exprs.get_mut(id.index())
    }

    /// Replace the node at `id`, returning the previous node.
    ///
    /// Parents keep pointing at `id`, so a pass can rewrite a subtree root
    /// without touching its parent.
    pub fn replace(&mut self, id: ExprId, expr: Expr) -> Expr {
        mem::replace(self.get_mut(id), expr)
    }

    /// Overwrite the literal of a `Const` node in place.
    ///
    /// # Panics
    /// Panics if the node at `id` is not a `Const`.
    #[track_caller]
    pub fn set_literal(&mut self, id: ExprId, literal: Literal) {
        match self.get_mut(id) {
            Expr::Const(value) => *value = literal,
            other => panic!("set_literal on {} node", other.tag().as_str()),
        }
    }

    /// Direct children of the node at `id`, in print order.
    pub fn children(&self, id: ExprId) -> ExprList {
        self.get(id).children()
    }

    /// Number of nodes in the subtree rooted at `id`, including `id`.
    pub fn subtree_len(&self, id: ExprId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            count += 1;
            stack.extend(self.children(next));
        }
        count
    }

    /// Get number of expressions.
    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Check if arena is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Number of backing chunks.
    pub fn chunk_count(&self) -> usize {
        self.exprs.chunk_count()
    }

    /// Drop all nodes. Previously issued ids become invalid.
    pub fn reset(&mut self) {
        self.exprs.reset();
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExprArena {{ {} exprs, {} chunks }}",
            self.exprs.len(),
            self.exprs.chunk_count()
        )
    }
}
