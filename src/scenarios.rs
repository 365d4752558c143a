// src/scenarios.rs
//! Reference generators driven by `cogen run`.

use cogen_runtime::{
    Generator, GeneratorConfig, GeneratorError, Step, make_generator_with, yield_,
};

/// `x += 1; x += 1; yield x`, forever.
pub fn counter(config: GeneratorConfig) -> Result<Generator<(), i64>, GeneratorError> {
    make_generator_with(config.with_name("counter"), |_| {
        let mut x = 0;
        loop {
            x += 1;
            x += 1;
            yield_::<i64, ()>(x)?;
        }
    })
}

/// `input = yield i; i += input`, starting from `i = 0`.
pub fn accumulator(config: GeneratorConfig) -> Result<Generator<i64, i64>, GeneratorError> {
    make_generator_with(config.with_name("accumulate"), |_| {
        let mut i = 0;
        loop {
            let input = yield_::<i64, i64>(i)?;
            i += input.iter().sum::<i64>();
        }
    })
}

/// Yields 1, 2, 3 and returns.
pub fn finite(config: GeneratorConfig) -> Result<Generator<(), i64>, GeneratorError> {
    make_generator_with(config.with_name("finite"), |_| {
        for n in 1..=3 {
            yield_::<i64, ()>(n)?;
        }
        Ok(())
    })
}

/// Values the leaf of [`nested`] yields before returning.
pub const LEAF_VALUES: usize = 3;

/// A chain of `depth` generators over a leaf yielding `leaf:1..=3`. Each
/// level drains the one below it and yields `<level>/<value>`.
pub fn nested(config: GeneratorConfig, depth: usize) -> Result<Generator<(), String>, GeneratorError> {
    if depth == 0 {
        return make_generator_with(config.with_name("leaf"), |_| {
            for n in 1..=LEAF_VALUES {
                yield_::<String, ()>(format!("leaf:{n}"))?;
            }
            Ok(())
        });
    }

    let name = format!("level{depth}");
    make_generator_with(config.clone().with_name(name), move |_| {
        let inner = nested(config.clone(), depth - 1)?;
        while let Step::Yielded(values) = inner.resume([])? {
            for value in values {
                yield_::<String, ()>(format!("{depth}/{value}"))?;
            }
        }
        Ok(())
    })
}
