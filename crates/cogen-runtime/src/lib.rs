//! Cooperative generators with bidirectional yield.
//!
//! A generator is an ordinary closure that runs on its own stack. Calling its
//! [`Generator`] handle transfers control in, [`yield_`] transfers control
//! back out with a value, and the next call's arguments become `yield_`'s
//! return value.
//!
//! ```
//! use cogen_runtime::{Generator, make_generator, yield_};
//!
//! let running_total: Generator<i64, i64> = make_generator(|_| {
//!     let mut total = 0;
//!     loop {
//!         let input = yield_::<i64, i64>(total)?;
//!         total += input.iter().sum::<i64>();
//!     }
//! })
//! .unwrap();
//!
//! assert_eq!(running_total.call_one([]).unwrap(), 0);
//! assert_eq!(running_total.call_one([5]).unwrap(), 5);
//! assert_eq!(running_total.call_one([3]).unwrap(), 8);
//! ```
//!
//! Execution is strictly single-threaded: one context runs at a time and the
//! suspension stack that routes `yield_` is per thread. Generator handles are
//! `!Send`.

mod bindings;
mod config;
mod error;
mod generator;
mod suspension;
mod values;

pub use cogen_context::{ContextId, StackConfig};
pub use config::{GeneratorConfig, ON_RETURN_ENV, OnReturn, STACK_SIZE_ENV};
pub use error::GeneratorError;
pub use generator::{
    Generator, GeneratorStatus, Step, make_generator, make_generator_with, yield_, yield_all,
};
pub use suspension::{SuspensionRecord, current_generator, suspension_depth, suspension_records};
pub use values::Values;
