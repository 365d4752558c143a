//! Generator configuration.

use std::fmt;
use std::str::FromStr;

use cogen_context::StackConfig;

/// Environment variable overriding the stack size in bytes.
pub const STACK_SIZE_ENV: &str = "COGEN_STACK_SIZE";

/// Environment variable selecting [`OnReturn`]: `complete` or `restart`.
pub const ON_RETURN_ENV: &str = "COGEN_ON_RETURN";

/// What happens when a generator body returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnReturn {
    /// The generator becomes `Completed`; resuming it is an error.
    #[default]
    Complete,
    /// The body is invoked again straight away with an empty argument list,
    /// so the generator never terminates.
    Restart,
}

impl FromStr for OnReturn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complete" => Ok(OnReturn::Complete),
            "restart" => Ok(OnReturn::Restart),
            other => Err(format!("unknown return policy '{other}'")),
        }
    }
}

impl fmt::Display for OnReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnReturn::Complete => f.write_str("complete"),
            OnReturn::Restart => f.write_str("restart"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub stack: StackConfig,
    pub on_return: OnReturn,
    /// Shown in diagnostics and tracing output.
    pub name: Option<String>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `COGEN_STACK_SIZE` and `COGEN_ON_RETURN`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`GeneratorConfig::from_env`] with a custom variable source.
    /// Values that fail to parse are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(STACK_SIZE_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(size) => config.stack = StackConfig::new(size),
                Err(err) => tracing::warn!(%raw, %err, "ignoring {STACK_SIZE_ENV}"),
            }
        }

        if let Some(raw) = lookup(ON_RETURN_ENV) {
            match raw.parse::<OnReturn>() {
                Ok(policy) => config.on_return = policy,
                Err(err) => tracing::warn!(%raw, %err, "ignoring {ON_RETURN_ENV}"),
            }
        }

        config
    }

    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack = StackConfig::new(size);
        self
    }

    pub fn with_on_return(mut self, on_return: OnReturn) -> Self {
        self.on_return = on_return;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
