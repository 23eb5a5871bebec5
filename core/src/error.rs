// crawlwork/src/error.rs
use anyhow::Error as AnyhowError;
use std::fmt;
use thiserror::Error;

/// The error-like payload carried by a `StepOutcome::Err`.
///
/// A step either hands over a ready-made `StepError`, a plain message, or any
/// error convertible into `anyhow::Error`; the latter is kept as the source.
#[derive(Debug)]
pub struct StepError {
  message: String,
  source: Option<AnyhowError>,
}

impl StepError {
  pub fn new<S: Into<String>>(message: S) -> Self {
    Self {
      message: message.into(),
      source: None,
    }
  }

  /// Wraps an arbitrary error, using its `Display` output as the message.
  pub fn from_source<E: Into<AnyhowError>>(source: E) -> Self {
    let source = source.into();
    Self {
      message: source.to_string(),
      source: Some(source),
    }
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn source_error(&self) -> Option<&AnyhowError> {
    self.source.as_ref()
  }
}

impl Default for StepError {
  fn default() -> Self {
    StepError::new(String::new())
  }
}

impl fmt::Display for StepError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)
  }
}

impl std::error::Error for StepError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    self.source.as_ref().map(|e| {
      let inner: &(dyn std::error::Error + 'static) = e.as_ref();
      inner
    })
  }
}

impl From<&str> for StepError {
  fn from(message: &str) -> Self {
    StepError::new(message)
  }
}

impl From<String> for StepError {
  fn from(message: String) -> Self {
    StepError::new(message)
  }
}

// `None` still yields a valid error value, with an empty message.
impl<T: Into<StepError>> From<Option<T>> for StepError {
  fn from(error: Option<T>) -> Self {
    error.map(Into::into).unwrap_or_default()
  }
}

impl From<AnyhowError> for StepError {
  fn from(err: AnyhowError) -> Self {
    StepError::from_source(err)
  }
}

impl From<WorkError> for StepError {
  fn from(err: WorkError) -> Self {
    StepError::from_source(err)
  }
}

/// Faults raised by the executor and codecs themselves, as opposed to step
/// failures, which are ordinary `StepOutcome::Err` values.
#[derive(Debug, Error)]
pub enum WorkError {
  #[error("No handler registered for worktype '{worktype}' (step {step_index})")]
  WorktypeNotFound { worktype: String, step_index: usize },

  #[error("Could not decode script value: {0}")]
  Decode(String),

  #[error("Assignment of key '{key}' failed during merge: {message}")]
  Merge { key: String, message: String },

  #[error("Configuration error: {0}")]
  Configuration(String),

  #[error("Error in user-provided handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal crawlwork error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for WorkError {
  fn from(err: AnyhowError) -> Self {
    WorkError::HandlerError { source: err }
  }
}

impl From<serde_json::Error> for WorkError {
  fn from(err: serde_json::Error) -> Self {
    WorkError::Decode(err.to_string())
  }
}

pub type WorkResult<T, E = WorkError> = std::result::Result<T, E>;
