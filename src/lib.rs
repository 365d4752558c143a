// src/lib.rs
//! `cogen`: stackful generators and the command-line driver for their
//! reference scenarios. The generator API itself lives in `cogen-runtime` and
//! is re-exported here.

pub mod cli;
pub mod commands;
pub mod scenarios;

pub use cogen_runtime::*;
