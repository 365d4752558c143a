//! The thread-local suspension stack.
//!
//! Each handle invocation pushes a `(generator, resume)` record and each
//! `yield_` pops the top one, so nested generator chains unwind back to their
//! callers in reverse invocation order. Borrows of the stack never span a
//! transfer.

use std::any::{TypeId, type_name};
use std::cell::RefCell;

use cogen_context::{ContextId, Yielder};

use crate::error::GeneratorError;
use crate::values::Values;

/// Argument and value types of one generator, checked by `yield_` before it
/// reinterprets the stored yielder.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Signature {
    argument: TypeId,
    value: TypeId,
    argument_name: &'static str,
    value_name: &'static str,
}

impl Signature {
    pub(crate) fn of<A: 'static, T: 'static>() -> Self {
        Self {
            argument: TypeId::of::<A>(),
            value: TypeId::of::<T>(),
            argument_name: type_name::<A>(),
            value_name: type_name::<T>(),
        }
    }

    fn matches(&self, other: &Signature) -> bool {
        self.argument == other.argument && self.value == other.value
    }

    fn describe(&self) -> String {
        format!("yield {} / resume {}", self.value_name, self.argument_name)
    }
}

/// One in-flight handle invocation.
#[derive(Clone, Copy, Debug)]
pub struct SuspensionRecord {
    /// The generator context that was entered.
    pub generator: ContextId,
    /// The context that invoked it and receives the next yield.
    pub resume: ContextId,
    yielder: *const (),
    signature: Signature,
}

impl SuspensionRecord {
    pub(crate) fn new<A: 'static, T: 'static>(
        generator: ContextId,
        resume: ContextId,
        yielder: *const Yielder<Values<A>, Values<T>>,
    ) -> Self {
        Self {
            generator,
            resume,
            yielder: yielder.cast(),
            signature: Signature::of::<A, T>(),
        }
    }

    /// The generator's yielder, if it was created for `Generator<A, T>`.
    pub(crate) fn yielder<A: 'static, T: 'static>(
        &self,
    ) -> Option<*const Yielder<Values<A>, Values<T>>> {
        self.signature
            .matches(&Signature::of::<A, T>())
            .then(|| self.yielder.cast())
    }
}

thread_local! {
    static SUSPENSION_STACK: RefCell<Vec<SuspensionRecord>> = const { RefCell::new(Vec::new()) };
}

/// Push a record. Returns the depth before the push, for [`truncate`].
pub(crate) fn push(record: SuspensionRecord) -> usize {
    SUSPENSION_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let depth = stack.len();
        tracing::trace!(
            generator = %record.generator,
            resume = %record.resume,
            depth,
            "suspension push"
        );
        stack.push(record);
        depth
    })
}

/// Drop every record above `depth`.
///
/// After a yield this is a no-op; after priming, completion or failure it
/// removes the record the handle pushed.
pub(crate) fn truncate(depth: usize) {
    SUSPENSION_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        debug_assert!(stack.len() <= depth + 1, "suspension stack grew across a call");
        stack.truncate(depth);
    })
}

/// Pop the top record on behalf of `yield_` running in `current`.
///
/// Fails without touching the stack when there is no record, the record
/// belongs to a different context, or the types do not match.
pub(crate) fn pop_for<A: 'static, T: 'static>(
    current: ContextId,
) -> Result<(SuspensionRecord, *const Yielder<Values<A>, Values<T>>), GeneratorError> {
    SUSPENSION_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let Some(top) = stack.last().copied() else {
            return Err(GeneratorError::YieldOutsideGenerator { current });
        };
        if top.generator != current {
            return Err(GeneratorError::YieldOutsideGenerator { current });
        }
        let Some(yielder) = top.yielder::<A, T>() else {
            return Err(GeneratorError::TypeMismatch {
                generator: top.generator,
                expected: top.signature.describe(),
                found: Signature::of::<A, T>().describe(),
            });
        };
        stack.pop();
        tracing::trace!(
            generator = %top.generator,
            resume = %top.resume,
            depth = stack.len(),
            "suspension pop"
        );
        Ok((top, yielder))
    })
}

/// Number of handle invocations currently in flight on this thread.
pub fn suspension_depth() -> usize {
    SUSPENSION_STACK.with(|stack| stack.borrow().len())
}

/// The innermost generator currently running on this thread.
pub fn current_generator() -> Option<ContextId> {
    SUSPENSION_STACK.with(|stack| stack.borrow().last().map(|record| record.generator))
}

/// A copy of the whole stack, bottom first.
pub fn suspension_records() -> Vec<SuspensionRecord> {
    SUSPENSION_STACK.with(|stack| stack.borrow().clone())
}
