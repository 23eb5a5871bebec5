// crawlwork/src/config.rs

use crate::error::{WorkError, WorkResult};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

pub const ENV_UNKNOWN_WORKTYPE: &str = "CRAWLWORK_UNKNOWN_WORKTYPE";
pub const ENV_MAX_STEPS: &str = "CRAWLWORK_MAX_STEPS";

/// What the executor does when a step names a worktype with no handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownWorktypePolicy {
  /// `Executor::run` returns `WorkError::WorktypeNotFound`.
  #[default]
  Error,
  /// The pipeline ends in `WorkState::Failed`.
  Fail,
}

impl FromStr for UnknownWorktypePolicy {
  type Err = WorkError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "error" => Ok(UnknownWorktypePolicy::Error),
      "fail" => Ok(UnknownWorktypePolicy::Fail),
      other => Err(WorkError::Configuration(format!(
        "Invalid {}: '{}' (expected 'error' or 'fail')",
        ENV_UNKNOWN_WORKTYPE, other
      ))),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutorConfig {
  pub unknown_worktype: UnknownWorktypePolicy,
  /// Works with more steps than this are refused before any step runs.
  pub max_steps: Option<usize>,
}

impl ExecutorConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_unknown_worktype(mut self, policy: UnknownWorktypePolicy) -> Self {
    self.unknown_worktype = policy;
    self
  }

  pub fn with_max_steps(mut self, max_steps: usize) -> Self {
    self.max_steps = Some(max_steps);
    self
  }

  /// Reads the config from the environment, loading `.env` if present.
  /// Unset variables keep their defaults.
  pub fn from_env() -> WorkResult<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from an arbitrary variable lookup.
  pub fn from_lookup<F>(lookup: F) -> WorkResult<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let unknown_worktype = match lookup(ENV_UNKNOWN_WORKTYPE) {
      Some(raw) => raw.parse::<UnknownWorktypePolicy>()?,
      None => UnknownWorktypePolicy::default(),
    };

    let max_steps = lookup(ENV_MAX_STEPS)
      .map(|raw| {
        raw
          .trim()
          .parse::<usize>()
          .map_err(|e| WorkError::Configuration(format!("Invalid {}: {}", ENV_MAX_STEPS, e)))
      })
      .transpose()?;

    tracing::debug!(?unknown_worktype, ?max_steps, "Executor configuration loaded.");

    Ok(Self {
      unknown_worktype,
      max_steps,
    })
  }
}
