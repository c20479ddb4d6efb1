use lasso::{Spur, ThreadedRodeo};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for component IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for a component placed on the canvas.
/// Internally a 4-byte `Spur` index.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(Spur);

impl ComponentId {
    /// Intern a string as a ComponentId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ComponentId(INTERNER.get_or_intern(s))
    }

    /// Look up an already interned ID without creating a new one.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ComponentId)
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a unique ID with a kind prefix (e.g. `led_1`, `button_2`).
    pub fn with_prefix(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComponentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ComponentId::intern("arduino_main");
        let b = ComponentId::intern("arduino_main");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "arduino_main");
    }

    #[test]
    fn prefixed_ids_are_unique() {
        let a = ComponentId::with_prefix("led");
        let b = ComponentId::with_prefix("led");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("led_"));
    }

    #[test]
    fn lookup_does_not_intern() {
        assert!(ComponentId::lookup("never_seen_component").is_none());
        let id = ComponentId::intern("seen_component");
        assert_eq!(ComponentId::lookup("seen_component"), Some(id));
    }
}
