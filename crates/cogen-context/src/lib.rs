//! Execution contexts for cogen generators.
//!
//! An [`ExecutionContext`] is an independently resumable unit of control with
//! its own stack. Control moves between contexts as a strict two-party
//! rendezvous: [`ExecutionContext::transfer`] runs the context until it hands
//! control back through [`Yielder::suspend`] or its body returns.
//!
//! Stack switching is done by `corosensei`. Everything here is single-threaded:
//! contexts are `!Send` and the "current context" marker is thread-local.

mod context;
mod error;
mod id;
mod stack;

pub use context::{ContextState, ExecutionContext, Transfer};
pub use corosensei::Yielder;
pub use error::ContextError;
pub use id::ContextId;
pub use stack::{DEFAULT_STACK_SIZE, MIN_STACK_SIZE, StackConfig};
