//! Context identity and the thread-local "currently running" marker.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique execution context identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static CURRENT: Cell<ContextId> = const { Cell::new(ContextId::ROOT) };
}

impl ContextId {
    /// The thread's original stack. Never allocated by [`ExecutionContext`](crate::ExecutionContext).
    pub const ROOT: ContextId = ContextId(0);

    pub(crate) fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Create a `ContextId` from a raw `u64`.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw `u64` value.
    pub fn as_raw(self) -> u64 {
        self.0
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }

    /// The context executing on this thread right now.
    pub fn current() -> Self {
        CURRENT.with(Cell::get)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            write!(f, "ctx#{}", self.as_raw())
        }
    }
}

/// Marks a context as current until dropped, then restores the previous one.
pub(crate) struct CurrentGuard {
    previous: ContextId,
}

impl CurrentGuard {
    pub(crate) fn enter(id: ContextId) -> Self {
        let previous = CURRENT.with(|current| current.replace(id));
        Self { previous }
    }
}

impl Drop for CurrentGuard {
    fn drop(&mut self) {
        CURRENT.with(|current| current.set(self.previous));
    }
}
