//! Generator handles, construction with priming, and `yield_`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use cogen_context::{ContextId, ExecutionContext, Transfer, Yielder};

use crate::config::{GeneratorConfig, OnReturn};
use crate::error::GeneratorError;
use crate::suspension::{self, SuspensionRecord};
use crate::values::Values;

type BodyResult = Result<(), GeneratorError>;
type GeneratorContext<A, T> = ExecutionContext<Values<A>, Values<T>, BodyResult>;

/// Generator lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorStatus {
    /// Constructed and parked before the body; no user code has run.
    Primed,
    /// Executing (possibly inside a nested generator it invoked).
    Running,
    /// Parked in `yield_`, waiting for the next call.
    Suspended,
    /// The body returned under [`OnReturn::Complete`].
    Completed,
    /// The body panicked or returned an error.
    Errored,
}

impl GeneratorStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GeneratorStatus::Completed | GeneratorStatus::Errored)
    }
}

/// Outcome of one [`Generator::resume`].
#[derive(Debug, PartialEq, Eq)]
pub enum Step<T> {
    Yielded(Values<T>),
    Completed,
}

struct Inner<A: 'static, T: 'static> {
    id: ContextId,
    /// The context that constructed the generator.
    creator: ContextId,
    name: Option<String>,
    status: Cell<GeneratorStatus>,
    yielder: *const Yielder<Values<A>, Values<T>>,
    context: RefCell<GeneratorContext<A, T>>,
}

/// Handle to a generator: a resumable body with its own stack.
///
/// `A` is the type of the arguments passed in on each call, `T` the type of
/// the values it yields. Clones share the same underlying context.
pub struct Generator<A: 'static, T: 'static> {
    inner: Rc<Inner<A, T>>,
}

impl<A: 'static, T: 'static> Clone for Generator<A, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Build a generator with [`GeneratorConfig::default`].
///
/// The body receives the arguments of the first call. Each `yield_` inside it
/// hands values to the caller and returns the arguments of the following call.
/// Construction primes the generator without running any of `body`.
pub fn make_generator<A, T, F>(body: F) -> Result<Generator<A, T>, GeneratorError>
where
    A: 'static,
    T: 'static,
    F: FnMut(Values<A>) -> Result<(), GeneratorError> + 'static,
{
    make_generator_with(GeneratorConfig::default(), body)
}

/// Build a generator with an explicit configuration.
#[tracing::instrument(level = "debug", skip_all, fields(name = config.name.as_deref(), on_return = %config.on_return))]
pub fn make_generator_with<A, T, F>(
    config: GeneratorConfig,
    mut body: F,
) -> Result<Generator<A, T>, GeneratorError>
where
    A: 'static,
    T: 'static,
    F: FnMut(Values<A>) -> Result<(), GeneratorError> + 'static,
{
    let creator = ContextId::current();
    let on_return = config.on_return;

    let published = Rc::new(Cell::new(std::ptr::null::<Yielder<Values<A>, Values<T>>>()));
    let publish = Rc::clone(&published);

    let mut context: GeneratorContext<A, T> = ExecutionContext::new(
        &config.stack,
        move |yielder: &Yielder<Values<A>, Values<T>>, _priming: Values<A>| -> BodyResult {
            publish.set(yielder as *const _);
            // Priming handshake: park before the body until the first call.
            let mut args = yielder.suspend(Values::new());
            loop {
                body(args)?;
                match on_return {
                    OnReturn::Complete => return Ok(()),
                    OnReturn::Restart => {
                        tracing::trace!(generator = %ContextId::current(), "body returned, restarting");
                        args = Values::new();
                    }
                }
            }
        },
    )?;
    let id = context.id();

    let depth = suspension::push(SuspensionRecord::new::<A, T>(id, creator, std::ptr::null()));
    let primed = context.transfer(Values::new());
    suspension::truncate(depth);

    match primed? {
        Transfer::Suspended(_) => {}
        Transfer::Finished(result) => {
            result?;
            return Err(GeneratorError::Exhausted { generator: id });
        }
    }

    let yielder = published.get();
    debug_assert!(!yielder.is_null(), "priming did not publish the yielder");
    tracing::debug!(generator = %id, %creator, "generator primed");

    Ok(Generator {
        inner: Rc::new(Inner {
            id,
            creator,
            name: config.name,
            status: Cell::new(GeneratorStatus::Primed),
            yielder,
            context: RefCell::new(context),
        }),
    })
}

impl<A: 'static, T: 'static> Generator<A, T> {
    pub fn id(&self) -> ContextId {
        self.inner.id
    }

    pub fn creator(&self) -> ContextId {
        self.inner.creator
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn status(&self) -> GeneratorStatus {
        self.inner.status.get()
    }

    pub fn is_done(&self) -> bool {
        self.status().is_terminal()
    }

    /// Resume with `args` and return what the next `yield_` delivers.
    ///
    /// A call during which the body finishes returns
    /// [`GeneratorError::Exhausted`]; use [`Generator::resume`] to tell
    /// completion apart from errors.
    pub fn call(&self, args: impl IntoIterator<Item = A>) -> Result<Values<T>, GeneratorError> {
        match self.resume(args)? {
            Step::Yielded(values) => Ok(values),
            Step::Completed => Err(GeneratorError::Exhausted {
                generator: self.inner.id,
            }),
        }
    }

    /// [`Generator::call`] for callers expecting exactly one value.
    ///
    /// A yield of zero values or of several values is not narrowed to its
    /// first element: it fails with [`GeneratorError::Arity`] and leaves the
    /// generator suspended, so [`Generator::call`] can pick up from there.
    pub fn call_one(&self, args: impl IntoIterator<Item = A>) -> Result<T, GeneratorError> {
        self.call(args)?.into_single()
    }

    /// Resume with `args` until the body yields or finishes.
    pub fn resume(&self, args: impl IntoIterator<Item = A>) -> Result<Step<T>, GeneratorError> {
        let inner = &*self.inner;
        let generator = inner.id;

        match inner.status.get() {
            GeneratorStatus::Completed => return Err(GeneratorError::Exhausted { generator }),
            GeneratorStatus::Errored => return Err(GeneratorError::Errored { generator }),
            GeneratorStatus::Running => return Err(GeneratorError::AlreadyRunning { generator }),
            GeneratorStatus::Primed | GeneratorStatus::Suspended => {}
        }
        let mut context = inner
            .context
            .try_borrow_mut()
            .map_err(|_| GeneratorError::AlreadyRunning { generator })?;

        let args: Values<A> = args.into_iter().collect();
        let resume = ContextId::current();
        tracing::trace!(%generator, %resume, args = args.len(), "resume");

        let depth = suspension::push(SuspensionRecord::new(generator, resume, inner.yielder));
        inner.status.set(GeneratorStatus::Running);
        let outcome = context.transfer(args);
        suspension::truncate(depth);

        match outcome {
            Ok(Transfer::Suspended(values)) => {
                inner.status.set(GeneratorStatus::Suspended);
                Ok(Step::Yielded(values))
            }
            Ok(Transfer::Finished(Ok(()))) => {
                inner.status.set(GeneratorStatus::Completed);
                tracing::debug!(%generator, "generator completed");
                Ok(Step::Completed)
            }
            Ok(Transfer::Finished(Err(err))) => {
                inner.status.set(GeneratorStatus::Errored);
                tracing::debug!(%generator, error = %err, "generator body failed");
                Err(err)
            }
            Err(err) => {
                let err = GeneratorError::from(err);
                inner.status.set(match err {
                    GeneratorError::Exhausted { .. } => GeneratorStatus::Completed,
                    _ => GeneratorStatus::Errored,
                });
                tracing::debug!(%generator, error = %err, "generator transfer failed");
                Err(err)
            }
        }
    }
}

impl<A: 'static, T: 'static> fmt::Debug for Generator<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("status", &self.inner.status.get())
            .finish()
    }
}

/// Yield one value from the innermost running generator.
///
/// Returns the arguments of the call that resumes it. `T` and `A` must be the
/// value and argument types of that generator.
pub fn yield_<T: 'static, A: 'static>(value: T) -> Result<Values<A>, GeneratorError> {
    yield_all(Values::one(value))
}

/// Yield any number of values from the innermost running generator.
pub fn yield_all<T: 'static, A: 'static>(
    values: impl IntoIterator<Item = T>,
) -> Result<Values<A>, GeneratorError> {
    let current = ContextId::current();
    let (record, yielder) = suspension::pop_for::<A, T>(current)?;
    tracing::trace!(generator = %record.generator, resume = %record.resume, "yield");

    // SAFETY: the record is on top of the stack and names the running
    // context, so its yielder belongs to a live coroutine whose body is
    // executing right now. `pop_for` checked that it was created for
    // `Generator<A, T>`.
    let yielder = unsafe { &*yielder };
    Ok(yielder.suspend(values.into_iter().collect()))
}
