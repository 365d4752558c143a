// src/cli/args.rs

use clap::{Parser, Subcommand, ValueEnum};
use cogen_runtime::{GeneratorConfig, OnReturn};

use crate::commands::version::version_string;

/// What a generator does when its body returns
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReturnMode {
    /// Mark the generator completed; further calls fail
    Complete,
    /// Run the body again with no arguments
    Restart,
}

impl From<ReturnMode> for OnReturn {
    fn from(mode: ReturnMode) -> Self {
        match mode {
            ReturnMode::Complete => OnReturn::Complete,
            ReturnMode::Restart => OnReturn::Restart,
        }
    }
}

/// Stackful generators with bidirectional yield
#[derive(Parser)]
#[command(name = "cogen")]
#[command(version = version_string())]
#[command(about = "Run cogen generator scenarios", long_about = None)]
pub struct Cli {
    /// Stack size for each generator, in bytes (default: COGEN_STACK_SIZE or 256 KiB)
    #[arg(long, global = true, value_name = "BYTES")]
    pub stack_size: Option<usize>,

    /// Behaviour when a generator body returns (default: COGEN_ON_RETURN or complete)
    #[arg(long, global = true, value_enum)]
    pub on_return: Option<ReturnMode>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::from_env();
        if let Some(size) = self.stack_size {
            config = config.with_stack_size(size);
        }
        if let Some(mode) = self.on_return {
            config = config.with_on_return(mode.into());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a reference scenario and print each value it produces
    #[command(visible_alias = "r")]
    Run {
        #[command(subcommand)]
        scenario: Scenario,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Scenario {
    /// x += 2 per step: prints 2, 4, 6, ...
    Counter {
        /// Number of calls to make
        #[arg(short, long, default_value_t = 4)]
        calls: usize,
    },
    /// input = yield i; i += input: one empty call, then one call per input
    Accumulate {
        /// Values passed on the second and later calls
        #[arg(value_name = "INPUTS", allow_negative_numbers = true)]
        inputs: Vec<i64>,
    },
    /// A chain of generators, each draining the one below
    Nested {
        /// Levels above the leaf generator
        #[arg(short, long, default_value_t = 3)]
        depth: usize,
        /// Number of calls to make (default: three per level)
        #[arg(short, long)]
        calls: Option<usize>,
    },
    /// Yields 1, 2, 3 then returns; shows the terminal state
    Finite {
        /// Number of calls to make
        #[arg(short, long, default_value_t = 5)]
        calls: usize,
    },
}
