//! Interned names with scoped bindings.
//!
//! A [`SymbolTable`] stores one copy of each distinct string and hands out
//! [`SymbolId`]s for it, so names compare by id rather than by content.
//! Every symbol also carries a stack of bindings of a caller-chosen type
//! `B`: name resolution pushes a binding on scope entry, reads the top one
//! on use and pops it on scope exit. [`SymbolTable::bind`] does the
//! push/pop pairing with a guard.
//!
//! ```ignore
//! let mut symbols = SymbolTable::<Value>::new();
//! let x = symbols.intern("x");
//!
//! let mut scope = symbols.bind(x, Value::Int(1));
//! assert_eq!(scope.get_binding(x), Some(&Value::Int(1)));
//! drop(scope);
//! assert_eq!(symbols.get_binding(x), None);
//! ```

use core::fmt;
use core::ops::{Deref, DerefMut};

use indexmap::IndexMap;

use crate::contract::{contract_assert, contract_violation};

/// Handle to an interned symbol. Valid for the table that produced it
/// until that table is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolId(u32);

impl SymbolId {
    /// Position of the symbol in insertion order.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse classification of a symbol, assigned by the front end
/// (identifier, keyword, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolKind(pub u8);

impl SymbolKind {
    pub const UNSPECIFIED: Self = Self(0);
}

/// What a symbol is: its kind and the token category a lexer should
/// produce for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolDescriptor {
    pub kind: SymbolKind,
    pub token: u16,
}

impl SymbolDescriptor {
    pub const UNSPECIFIED: Self = Self::new(SymbolKind::UNSPECIFIED, 0);

    #[inline]
    pub const fn new(kind: SymbolKind, token: u16) -> Self {
        Self { kind, token }
    }
}

#[derive(Debug, Clone)]
struct Entry<B> {
    descriptor: SymbolDescriptor,
    bindings: Vec<B>,
}

/// A borrowed view of one interned symbol.
#[derive(Debug)]
pub struct Symbol<'a, B> {
    id: SymbolId,
    text: &'a str,
    entry: &'a Entry<B>,
}

impl<'a, B> Symbol<'a, B> {
    #[inline]
    pub fn id(&self) -> SymbolId {
        self.id
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn descriptor(&self) -> SymbolDescriptor {
        self.entry.descriptor
    }

    /// The innermost binding, if any.
    #[inline]
    pub fn binding(&self) -> Option<&'a B> {
        self.entry.bindings.last()
    }

    /// Number of bindings currently in effect.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entry.bindings.len()
    }
}

impl<B> Clone for Symbol<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Symbol<'_, B> {}

impl<B> PartialEq for Symbol<'_, B> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl<B> Eq for Symbol<'_, B> {}

impl<B> fmt::Display for Symbol<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Interning store of symbols with per-symbol binding stacks.
///
/// Symbols live as long as the table. Storage is insertion ordered, and
/// a symbol's id is its position.
#[derive(Debug, Clone)]
pub struct SymbolTable<B> {
    entries: IndexMap<Box<str>, Entry<B>>,
}

impl<B> SymbolTable<B> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Intern `text`, returning the existing symbol if it is already
    /// present.
    ///
    /// The descriptor is recorded only when the symbol is first created;
    /// later insertions of the same text keep the original descriptor.
    pub fn insert(&mut self, text: &str, descriptor: SymbolDescriptor) -> SymbolId {
        if let Some(index) = self.entries.get_index_of(text) {
            return Self::id_at(index);
        }
        let (index, _) = self.entries.insert_full(
            text.into(),
            Entry {
                descriptor,
                bindings: Vec::new(),
            },
        );
        log::trace!(target: "frontkit::symbol", "interned {:?} as #{}", text, index);
        Self::id_at(index)
    }

    /// Intern `text` with an unspecified descriptor.
    #[inline]
    pub fn intern(&mut self, text: &str) -> SymbolId {
        self.insert(text, SymbolDescriptor::UNSPECIFIED)
    }

    /// Find the symbol for `text` without inserting it.
    #[inline]
    pub fn lookup(&self, text: &str) -> Option<SymbolId> {
        self.entries.get_index_of(text).map(Self::id_at)
    }

    #[track_caller]
    pub fn symbol(&self, id: SymbolId) -> Symbol<'_, B> {
        match self.entries.get_index(id.index()) {
            Some((text, entry)) => Symbol { id, text, entry },
            None => contract_violation!("unknown symbol {}", id),
        }
    }

    #[track_caller]
    #[inline]
    pub fn text(&self, id: SymbolId) -> &str {
        self.symbol(id).text()
    }

    #[track_caller]
    #[inline]
    pub fn descriptor(&self, id: SymbolId) -> SymbolDescriptor {
        self.symbol(id).descriptor()
    }

    /// Make `payload` the innermost binding of `id`.
    #[track_caller]
    pub fn push_binding(&mut self, id: SymbolId, payload: B) {
        let (text, entry) = self.entry_mut(id);
        entry.bindings.push(payload);
        log::trace!(
            target: "frontkit::symbol",
            "bound {:?} at depth {}",
            text,
            entry.bindings.len()
        );
    }

    /// Remove and return the innermost binding of `id`.
    ///
    /// Popping a symbol with no bindings is a contract violation.
    #[track_caller]
    pub fn pop_binding(&mut self, id: SymbolId) -> B {
        let (text, entry) = self.entry_mut(id);
        match entry.bindings.pop() {
            Some(payload) => {
                log::trace!(
                    target: "frontkit::symbol",
                    "unbound {:?} at depth {}",
                    text,
                    entry.bindings.len() + 1
                );
                payload
            }
            None => contract_violation!("pop from the empty binding stack of {:?}", text),
        }
    }

    /// The innermost binding of `id`, if any.
    #[track_caller]
    #[inline]
    pub fn get_binding(&self, id: SymbolId) -> Option<&B> {
        self.symbol(id).binding()
    }

    #[track_caller]
    pub fn get_binding_mut(&mut self, id: SymbolId) -> Option<&mut B> {
        self.entry_mut(id).1.bindings.last_mut()
    }

    #[track_caller]
    #[inline]
    pub fn binding_depth(&self, id: SymbolId) -> usize {
        self.symbol(id).depth()
    }

    /// Push `payload` for the lifetime of the returned guard.
    ///
    /// The guard dereferences to the table, so nested scopes bind through
    /// it. When it drops, the binding it pushed is popped.
    #[track_caller]
    pub fn bind(&mut self, id: SymbolId, payload: B) -> BindingGuard<'_, B> {
        self.push_binding(id, payload);
        BindingGuard { table: self, id }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Symbol<'_, B>> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, (text, entry))| Symbol {
                id: Self::id_at(index),
                text,
                entry,
            })
    }

    /// Drop every symbol and binding. Previously issued ids become invalid.
    pub fn clear(&mut self) {
        log::debug!(target: "frontkit::symbol", "clearing {} symbols", self.entries.len());
        self.entries.clear();
    }

    #[track_caller]
    fn entry_mut(&mut self, id: SymbolId) -> (&str, &mut Entry<B>) {
        match self.entries.get_index_mut(id.index()) {
            Some((text, entry)) => (&**text, entry),
            None => contract_violation!("unknown symbol {}", id),
        }
    }

    #[track_caller]
    fn id_at(index: usize) -> SymbolId {
        contract_assert!(
            index <= u32::MAX as usize,
            "symbol table overflow at index {}",
            index
        );
        SymbolId(index as u32)
    }
}

impl<B> Default for SymbolTable<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped binding returned by [`SymbolTable::bind`].
#[must_use = "the binding is popped as soon as the guard drops"]
#[derive(Debug)]
pub struct BindingGuard<'a, B> {
    table: &'a mut SymbolTable<B>,
    id: SymbolId,
}

impl<B> BindingGuard<'_, B> {
    /// The symbol this guard keeps bound.
    #[inline]
    pub fn id(&self) -> SymbolId {
        self.id
    }
}

impl<B> Deref for BindingGuard<'_, B> {
    type Target = SymbolTable<B>;

    fn deref(&self) -> &SymbolTable<B> {
        self.table
    }
}

impl<B> DerefMut for BindingGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut SymbolTable<B> {
        self.table
    }
}

impl<B> Drop for BindingGuard<'_, B> {
    fn drop(&mut self) {
        // Panicking here could abort while unwinding, so an empty stack is
        // only logged.
        let popped = self
            .table
            .entries
            .get_index_mut(self.id.index())
            .and_then(|(_, entry)| entry.bindings.pop());
        if popped.is_none() {
            log::error!(
                target: "frontkit::contract",
                "binding guard for {} found no binding to pop",
                self.id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_by_content() {
        let mut table = SymbolTable::<()>::new();
        let a = table.intern("alpha");
        let owned = String::from("alpha");
        let b = table.intern(&owned);
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
        assert_eq!(table.text(a), "alpha");

        let c = table.intern("beta");
        assert_ne!(a, c);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn lookup_never_inserts() {
        let mut table = SymbolTable::<()>::new();
        assert_eq!(table.lookup("x"), None);
        assert!(table.is_empty());
        let x = table.intern("x");
        assert_eq!(table.lookup("x"), Some(x));
    }

    #[test]
    fn first_descriptor_is_kept() {
        let keyword = SymbolDescriptor::new(SymbolKind(1), 7);
        let mut table = SymbolTable::<()>::new();
        let id = table.insert("let", keyword);
        let again = table.insert("let", SymbolDescriptor::UNSPECIFIED);
        assert_eq!(id, again);
        assert_eq!(table.descriptor(id), keyword);
    }

    #[test]
    fn binding_stack_is_lifo() {
        let mut table = SymbolTable::new();
        let x = table.intern("x");
        assert_eq!(table.get_binding(x), None);

        table.push_binding(x, 1);
        table.push_binding(x, 2);
        assert_eq!(table.get_binding(x), Some(&2));
        assert_eq!(table.get_binding(x), Some(&2));
        assert_eq!(table.binding_depth(x), 2);

        assert_eq!(table.pop_binding(x), 2);
        assert_eq!(table.get_binding(x), Some(&1));
        assert_eq!(table.pop_binding(x), 1);
        assert_eq!(table.get_binding(x), None);
    }

    #[test]
    #[should_panic(expected = "pop from the empty binding stack of \"x\"")]
    fn pop_of_empty_stack_is_a_contract_violation() {
        let mut table = SymbolTable::<u8>::new();
        let x = table.intern("x");
        table.push_binding(x, 1);
        table.pop_binding(x);
        table.pop_binding(x);
    }

    #[test]
    fn bindings_are_per_symbol() {
        let mut table = SymbolTable::new();
        let x = table.intern("x");
        let y = table.intern("y");
        table.push_binding(x, "outer x");
        table.push_binding(y, "y");
        table.push_binding(x, "inner x");
        assert_eq!(table.pop_binding(x), "inner x");
        assert_eq!(table.get_binding(y), Some(&"y"));
    }

    #[test]
    fn bind_guard_pops_on_drop() {
        let mut table = SymbolTable::new();
        let x = table.intern("x");
        {
            let mut outer = table.bind(x, 1);
            {
                let inner = outer.bind(x, 2);
                assert_eq!(inner.get_binding(x), Some(&2));
            }
            assert_eq!(outer.get_binding(x), Some(&1));
            *outer.get_binding_mut(x).unwrap() = 10;
            assert_eq!(outer.get_binding(x), Some(&10));
        }
        assert_eq!(table.binding_depth(x), 0);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut table = SymbolTable::<()>::new();
        for name in ["c", "a", "b", "a"] {
            table.intern(name);
        }
        let names: Vec<_> = table.iter().map(|s| s.text()).collect();
        assert_eq!(names, ["c", "a", "b"]);
        let ids: Vec<_> = table.iter().map(|s| s.id().index()).collect();
        assert_eq!(ids, [0, 1, 2]);
    }

    #[test]
    fn clear_drops_everything() {
        let mut table = SymbolTable::new();
        let x = table.intern("x");
        table.push_binding(x, ());
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.lookup("x"), None);
    }

    #[test]
    #[should_panic(expected = "unknown symbol #0")]
    fn stale_id_is_a_contract_violation() {
        let mut table = SymbolTable::<()>::new();
        let x = table.intern("x");
        table.clear();
        table.text(x);
    }
}
