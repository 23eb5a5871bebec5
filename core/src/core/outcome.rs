// crawlwork/src/core/outcome.rs

//! Defines `StepOutcome`, the three-way result a step reports, and the
//! builders step authors use to produce one.

use crate::core::package::Package;
use crate::error::StepError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input accepted by the `ok`/`then` builders: either an existing package,
/// which is reused as-is, or the parts to build a new one from.
#[derive(Debug)]
pub enum PackageSource {
  Built(Package),
  Parts { name: String, content: Value },
}

impl PackageSource {
  pub fn into_package(self) -> Package {
    match self {
      PackageSource::Built(package) => package,
      PackageSource::Parts { name, content } => Package::new(name, content),
    }
  }
}

impl From<Package> for PackageSource {
  fn from(package: Package) -> Self {
    PackageSource::Built(package)
  }
}

impl<S: Into<String>, V: Into<Value>> From<(S, V)> for PackageSource {
  fn from((name, content): (S, V)) -> Self {
    PackageSource::Parts {
      name: name.into(),
      content: content.into(),
    }
  }
}

/// Outcome of running one step.
///
/// - `Ok` is terminal success; `package` is the final output.
/// - `Err` is terminal failure.
/// - `Then` continues the pipeline, handing `package` to the next step.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepOutcome {
  Ok { package: Package },
  Err {
    #[serde(default)]
    error: StepError,
  },
  Then { package: Package },
}

impl StepOutcome {
  pub fn ok<P: Into<PackageSource>>(package: P) -> Self {
    StepOutcome::Ok {
      package: package.into().into_package(),
    }
  }

  pub fn ok_parts<S: Into<String>, V: Into<Value>>(name: S, content: V) -> Self {
    StepOutcome::ok((name, content))
  }

  pub fn err<E: Into<StepError>>(error: E) -> Self {
    StepOutcome::Err { error: error.into() }
  }

  pub fn then<P: Into<PackageSource>>(package: P) -> Self {
    StepOutcome::Then {
      package: package.into().into_package(),
    }
  }

  pub fn then_parts<S: Into<String>, V: Into<Value>>(name: S, content: V) -> Self {
    StepOutcome::then((name, content))
  }

  /// The wire tag of this outcome.
  pub fn tag(&self) -> &'static str {
    match self {
      StepOutcome::Ok { .. } => "ok",
      StepOutcome::Err { .. } => "err",
      StepOutcome::Then { .. } => "then",
    }
  }

  pub fn is_terminal(&self) -> bool {
    !matches!(self, StepOutcome::Then { .. })
  }

  pub fn package(&self) -> Option<&Package> {
    match self {
      StepOutcome::Ok { package } | StepOutcome::Then { package } => Some(package),
      StepOutcome::Err { .. } => None,
    }
  }

  pub fn error(&self) -> Option<&StepError> {
    match self {
      StepOutcome::Err { error } => Some(error),
      _ => None,
    }
  }
}

impl From<StepError> for StepOutcome {
  fn from(error: StepError) -> Self {
    StepOutcome::Err { error }
  }
}
