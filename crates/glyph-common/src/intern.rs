//! Append-only symbol interner.
//!
//! An append-only string pool shared by the whole application, keyed the
//! way a `name_to_id: FxHashMap` registry is: by value, returning a cheap
//! opaque id.
//! Repeated inserts of the same string return the same `Symbol`: the pool
//! is append-only and never reassigns an index once handed out.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub u32);

#[derive(Default)]
pub struct StringPool {
    inner: Mutex<StringPoolInner>,
}

#[derive(Default)]
struct StringPoolInner {
    strings: Vec<String>,
    lookup: FxHashMap<String, Symbol>,
}

impl StringPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, s: &str) -> Symbol {
        let mut inner = self.inner.lock().expect("string pool poisoned");
        if let Some(sym) = inner.lookup.get(s) {
            return *sym;
        }
        let sym = Symbol(inner.strings.len() as u32);
        inner.strings.push(s.to_string());
        inner.lookup.insert(s.to_string(), sym);
        sym
    }

    pub fn resolve(&self, sym: Symbol) -> String {
        let inner = self.inner.lock().expect("string pool poisoned");
        inner.strings[sym.0 as usize].clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("string pool poisoned").strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let pool = StringPool::new();
        let a = pool.intern("Int");
        let b = pool.intern("Int");
        let c = pool.intern("String");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.resolve(a), "Int");
    }
}
