// src/commands/run.rs

use std::io::{self, Write};
use std::process::ExitCode;

use cogen_runtime::{GeneratorConfig, GeneratorError, Step};
use miette::{Diagnostic, Report};
use thiserror::Error;

use crate::cli::Scenario;
use crate::scenarios;

#[derive(Debug, Error, Diagnostic)]
pub enum RunError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Generator(#[from] GeneratorError),

    #[error("could not write output")]
    #[diagnostic(code(cogen::io))]
    Io(#[from] io::Error),
}

/// Run a scenario, printing values to stdout and errors to stderr.
pub fn run_scenario(scenario: &Scenario, config: GeneratorConfig) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match execute(scenario, config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = out.flush();
            eprintln!("{:?}", Report::new(err));
            ExitCode::FAILURE
        }
    }
}

/// Run a scenario against any writer.
#[tracing::instrument(level = "debug", skip(config, out))]
pub fn execute(
    scenario: &Scenario,
    config: GeneratorConfig,
    out: &mut impl Write,
) -> Result<(), RunError> {
    match scenario {
        Scenario::Counter { calls } => {
            let counter = scenarios::counter(config)?;
            for _ in 0..*calls {
                writeln!(out, "{}", counter.call_one([])?)?;
            }
        }
        Scenario::Accumulate { inputs } => {
            let accumulate = scenarios::accumulator(config)?;
            writeln!(out, "{}", accumulate.call_one([])?)?;
            for input in inputs {
                writeln!(out, "{}", accumulate.call_one([*input])?)?;
            }
        }
        Scenario::Nested { depth, calls } => {
            let top = scenarios::nested(config, *depth)?;
            let calls = calls.unwrap_or(scenarios::LEAF_VALUES * (*depth).max(1));
            for _ in 0..calls {
                match top.resume([])? {
                    Step::Yielded(values) => {
                        for value in values {
                            writeln!(out, "{value}")?;
                        }
                    }
                    Step::Completed => break,
                }
            }
        }
        Scenario::Finite { calls } => {
            let finite = scenarios::finite(config)?;
            for _ in 0..*calls {
                match finite.call_one([]) {
                    Ok(value) => writeln!(out, "{value}")?,
                    Err(err @ GeneratorError::Exhausted { .. }) => {
                        tracing::debug!(generator = %finite.id(), "finite scenario exhausted");
                        writeln!(out, "{err}")?;
                        break;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}
