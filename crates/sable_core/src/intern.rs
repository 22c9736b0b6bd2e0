//! String interning.
//!
//! Identifier and literal text is interned so nodes carry a compact handle
//! and name comparison is an integer comparison.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// A handle to an interned string. `Copy`, and `Eq` in O(1).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe interner. Cloning shares the underlying table, so a parser
/// and its caller can resolve the same handles.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern `s`, returning the existing handle if already present.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    /// Look up a handle without interning on a miss.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString::from_spur)
    }

    /// Resolve a handle back to its text.
    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.as_spur())
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_and_resolve() {
        let interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        let c = interner.intern("bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "foo");
    }

    #[test]
    fn shared_across_clones() {
        let interner = StringInterner::new();
        let clone = interner.clone();
        let key = clone.intern("shared");
        assert_eq!(interner.resolve(key), "shared");
    }
}
