//! Process-wide shared counter with exactly-once lazy construction.
use std::sync::atomic::{AtomicU64, Ordering};
use once_cell::sync::OnceCell;

static INSTANCE: OnceCell<SharedCounter> = OnceCell::new();

// How many times the constructor actually ran. Stays at 1 for the life of
// the process once the gate has been passed; anything else means the gate
// is broken.
static CONSTRUCTIONS: AtomicU64 = AtomicU64::new(0);

// ========================================
// SHARED COUNTER (the singleton)
// ========================================

/// The one counter object shared by every thread in the process.
///
/// There is no public constructor: the only way to reach a `SharedCounter`
/// is through [`SharedCounter::global`], so at most one instance can exist.
pub struct SharedCounter {
    count: AtomicU64,
}

impl SharedCounter {
    fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }

    /// Get the shared instance, constructing it on first access.
    ///
    /// Every caller, from any thread, gets a reference to the *same*
    /// object. When several threads race here before the instance exists,
    /// exactly one of them runs the constructor; the others wait until the
    /// value is published, then all return the same `&'static` reference.
    pub fn global() -> &'static SharedCounter {
        // OnceCell is the double-checked strategy: an atomic acquire-load
        // fast path once the cell is set, an internal lock only while the
        // winning thread runs the closure. Construction is infallible, so
        // there is no error path out of here.
        INSTANCE.get_or_init(|| {
            CONSTRUCTIONS.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("shared counter constructed");
            SharedCounter::new()
        })
    }

    /// Atomically add 1 and return the new value.
    ///
    /// `fetch_add` is a single hardware read-modify-write: concurrent
    /// callers serialize on the cache line and no update is lost, however
    /// many threads pile in. Wraps around at `u64::MAX`.
    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Current counter value.
    ///
    /// The load is atomic, never torn: the result is always a value the
    /// counter actually held. It may race with in-flight increments and
    /// land before or after any one of them.
    pub fn value(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// How many times the construction closure has run: 0 before the first
/// access, 1 forever after. Diagnostic for the exactly-once guarantee.
pub fn constructions() -> u64 {
    CONSTRUCTIONS.load(Ordering::Relaxed)
}

// ==========================================
// TESTS
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let c = SharedCounter::new();
        assert_eq!(c.value(), 0);
    }

    #[test]
    fn increment_returns_the_new_value() {
        let c = SharedCounter::new();
        assert_eq!(c.increment(), 1);
        assert_eq!(c.increment(), 2);
        assert_eq!(c.value(), 2);
    }

    #[test]
    fn wraps_at_u64_max() {
        let c = SharedCounter {
            count: AtomicU64::new(u64::MAX),
        };
        assert_eq!(c.increment(), 0);
        assert_eq!(c.value(), 0);
    }

    #[test]
    fn global_returns_one_object() {
        let a = SharedCounter::global();
        let b = SharedCounter::global();
        assert!(std::ptr::eq(a, b));
        assert_eq!(constructions(), 1);
    }
}
