//! Stackful execution contexts via corosensei.
//!
//! `ExecutionContext` wraps `corosensei::Coroutine`, adding identity, an
//! explicit lifecycle, and panic containment. A transfer into a finished
//! context is reported as [`ContextError::Finished`] instead of panicking
//! inside corosensei.

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use corosensei::stack::DefaultStack;
use corosensei::{Coroutine, CoroutineResult, Yielder};

use crate::error::ContextError;
use crate::id::{ContextId, CurrentGuard};
use crate::stack::StackConfig;

/// Lifecycle of a context as seen from outside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// Created; the body has not started.
    Fresh,
    /// The body handed control back and can be resumed.
    Suspended,
    /// The body returned or panicked. Further transfers fail.
    Finished,
}

/// What came back from one [`ExecutionContext::transfer`].
#[derive(Debug, PartialEq, Eq)]
pub enum Transfer<O, R> {
    /// The body suspended with this value.
    Suspended(O),
    /// The body returned this value.
    Finished(R),
}

/// An execution context with its own stack.
///
/// `I` flows in on every transfer, `O` flows out on every suspension and `R`
/// is what the body returns.
pub struct ExecutionContext<I, O, R = ()> {
    id: ContextId,
    state: ContextState,
    /// Set while the stack is being torn down so the body re-raises the unwind.
    unwinding: Rc<Cell<bool>>,
    coroutine: Coroutine<I, O, Result<R, String>, DefaultStack>,
}

impl<I: 'static, O: 'static, R: 'static> ExecutionContext<I, O, R> {
    /// Allocate a context that will run `body` on the first transfer into it.
    ///
    /// The body receives the yielder (for transferring back out) and the
    /// input of that first transfer.
    pub fn new<F>(stack: &StackConfig, body: F) -> Result<Self, ContextError>
    where
        F: FnOnce(&Yielder<I, O>, I) -> R + 'static,
    {
        let id = ContextId::fresh();
        let unwinding = Rc::new(Cell::new(false));
        let teardown = Rc::clone(&unwinding);

        let coroutine = Coroutine::with_stack(
            stack.allocate()?,
            move |yielder: &Yielder<I, O>, input: I| {
                match panic::catch_unwind(AssertUnwindSafe(move || body(yielder, input))) {
                    Ok(value) => Ok(value),
                    Err(payload) if teardown.get() => panic::resume_unwind(payload),
                    Err(payload) => Err(panic_message(payload.as_ref())),
                }
            },
        );

        tracing::trace!(context = %id, stack_size = stack.size(), "context created");

        Ok(Self {
            id,
            state: ContextState::Fresh,
            unwinding,
            coroutine,
        })
    }
}

impl<I, O, R> ExecutionContext<I, O, R> {
    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == ContextState::Finished
    }

    /// Transfer control into this context.
    ///
    /// Returns once the body suspends or returns. While the body runs,
    /// [`ContextId::current`] reports this context.
    pub fn transfer(&mut self, input: I) -> Result<Transfer<O, R>, ContextError> {
        if self.state == ContextState::Finished {
            return Err(ContextError::Finished { id: self.id });
        }

        tracing::trace!(from = %ContextId::current(), to = %self.id, "transfer");
        let result = {
            let _current = CurrentGuard::enter(self.id);
            self.coroutine.resume(input)
        };

        match result {
            CoroutineResult::Yield(output) => {
                self.state = ContextState::Suspended;
                Ok(Transfer::Suspended(output))
            }
            CoroutineResult::Return(Ok(value)) => {
                self.state = ContextState::Finished;
                tracing::trace!(context = %self.id, "context finished");
                Ok(Transfer::Finished(value))
            }
            CoroutineResult::Return(Err(message)) => {
                self.state = ContextState::Finished;
                tracing::debug!(context = %self.id, %message, "context panicked");
                Err(ContextError::Panicked {
                    id: self.id,
                    message,
                })
            }
        }
    }
}

impl<I, O, R> Drop for ExecutionContext<I, O, R> {
    fn drop(&mut self) {
        // Unwind a suspended body so the values it owns are dropped. The
        // catch in `new` must not swallow this unwind.
        if self.coroutine.started() && !self.coroutine.done() {
            tracing::trace!(context = %self.id, "unwinding suspended context");
            self.unwinding.set(true);
            let _current = CurrentGuard::enter(self.id);
            self.coroutine.force_unwind();
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context<R: 'static>(
        body: impl FnOnce(&Yielder<i64, i64>, i64) -> R + 'static,
    ) -> ExecutionContext<i64, i64, R> {
        ExecutionContext::new(&StackConfig::default(), body).expect("stack allocation")
    }

    #[test]
    fn context_yields_sequence() {
        let mut ctx = context(|yielder, _input| {
            yielder.suspend(1);
            yielder.suspend(2);
            yielder.suspend(3);
        });

        assert_eq!(ctx.transfer(0).unwrap(), Transfer::Suspended(1));
        assert_eq!(ctx.transfer(0).unwrap(), Transfer::Suspended(2));
        assert_eq!(ctx.transfer(0).unwrap(), Transfer::Suspended(3));
        assert_eq!(ctx.transfer(0).unwrap(), Transfer::Finished(()));
    }

    #[test]
    fn finished_context_rejects_transfer() {
        let mut ctx = context(|yielder, _input| {
            yielder.suspend(42);
        });
        let id = ctx.id();

        assert_eq!(ctx.state(), ContextState::Fresh);
        assert_eq!(ctx.transfer(0).unwrap(), Transfer::Suspended(42));
        assert_eq!(ctx.state(), ContextState::Suspended);
        assert_eq!(ctx.transfer(0).unwrap(), Transfer::Finished(()));
        assert!(ctx.is_finished());

        // Stays finished
        for _ in 0..2 {
            match ctx.transfer(0) {
                Err(ContextError::Finished { id: reported }) => assert_eq!(reported, id),
                other => panic!("expected Finished error, got {other:?}"),
            }
        }
    }

    #[test]
    fn context_drop_before_finish() {
        // Dropping a suspended context must unwind and free its stack.
        let mut ctx = context(|yielder, _input| {
            yielder.suspend(10);
            yielder.suspend(20);
        });
        assert_eq!(ctx.transfer(0).unwrap(), Transfer::Suspended(10));
        drop(ctx);
    }

    #[test]
    fn fresh_context_drop_never_runs_body() {
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let ctx = context(move |_yielder, _input| flag.set(true));
        drop(ctx);
        assert!(!ran.get());
    }

    #[test]
    fn panic_message_extracts_strings() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "borrowed");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
