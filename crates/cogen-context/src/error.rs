use std::io;

use thiserror::Error;

use crate::id::ContextId;

/// Failures of the context layer itself.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Transfer into a context whose body already returned or panicked.
    #[error("resumed a finished context ({id})")]
    Finished { id: ContextId },

    /// The context body panicked. The panic was caught on the context's own stack.
    #[error("context {id} panicked: {message}")]
    Panicked { id: ContextId, message: String },

    #[error("failed to allocate a {size}-byte context stack")]
    StackAllocation {
        size: usize,
        #[source]
        source: io::Error,
    },
}
