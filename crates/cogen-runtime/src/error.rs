//! Generator errors (G0xxx).
//!
//! Every failure here propagates synchronously to the immediate caller of the
//! offending operation. Nothing is retried.

#![allow(unused_assignments)] // False positives from thiserror derive

use std::io;

use cogen_context::{ContextError, ContextId};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum GeneratorError {
    #[error("yield called outside of a generator (running in {current})")]
    #[diagnostic(
        code(G0001),
        help("yield_ is only valid while a generator body is executing on this thread")
    )]
    YieldOutsideGenerator { current: ContextId },

    #[error("generator {generator} is exhausted")]
    #[diagnostic(code(G0002), help("the body returned; build a new generator to start over"))]
    Exhausted { generator: ContextId },

    #[error("generator {generator} is already running")]
    #[diagnostic(code(G0003), help("a generator cannot resume itself from inside its own body"))]
    AlreadyRunning { generator: ContextId },

    #[error("generator {generator} panicked: {message}")]
    #[diagnostic(code(G0004))]
    Panicked {
        generator: ContextId,
        message: String,
    },

    #[error("generator {generator} previously failed and cannot be resumed")]
    #[diagnostic(code(G0005))]
    Errored { generator: ContextId },

    #[error("yield type mismatch in generator {generator}: expected {expected}, found {found}")]
    #[diagnostic(
        code(G0006),
        help("the value and argument types given to yield_ must match the innermost generator")
    )]
    TypeMismatch {
        generator: ContextId,
        expected: String,
        found: String,
    },

    #[error("expected {expected} value(s), found {found}")]
    #[diagnostic(code(G0007))]
    Arity { expected: usize, found: usize },

    #[error("failed to allocate a {size}-byte generator stack")]
    #[diagnostic(code(G0008), help("lower the stack size (COGEN_STACK_SIZE / --stack-size)"))]
    StackAllocation {
        size: usize,
        #[source]
        source: io::Error,
    },
}

impl From<ContextError> for GeneratorError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Finished { id } => GeneratorError::Exhausted { generator: id },
            ContextError::Panicked { id, message } => GeneratorError::Panicked {
                generator: id,
                message,
            },
            ContextError::StackAllocation { size, source } => {
                GeneratorError::StackAllocation { size, source }
            }
        }
    }
}
