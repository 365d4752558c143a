//! Stack sizing for new contexts.

use corosensei::stack::DefaultStack;

use crate::error::ContextError;

/// Stack size used when nothing else is configured.
pub const DEFAULT_STACK_SIZE: usize = 256 * 1024;

/// Requests below this are rounded up; panics and tracing need some headroom.
pub const MIN_STACK_SIZE: usize = 16 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackConfig {
    size: usize,
}

impl StackConfig {
    pub fn new(size: usize) -> Self {
        Self {
            size: size.max(MIN_STACK_SIZE),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn allocate(&self) -> Result<DefaultStack, ContextError> {
        DefaultStack::new(self.size).map_err(|source| ContextError::StackAllocation {
            size: self.size,
            source,
        })
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_SIZE)
    }
}
