// crawlwork/src/work/definition.rs

//! Contains the `WorkSpec` declaration: an ordered list of steps to run as
//! one pipeline. Building a `WorkSpec` executes nothing.

use crate::core::descriptor::StepDescriptor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered step descriptors. Index order is execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkSpec {
  steps: Vec<StepDescriptor>,
}

impl WorkSpec {
  /// Wraps `steps` unmodified.
  pub fn new(steps: Vec<StepDescriptor>) -> Self {
    Self { steps }
  }

  pub fn steps(&self) -> &[StepDescriptor] {
    &self.steps
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  /// An empty `WorkSpec` is legal; running it has no effect.
  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub fn into_steps(self) -> Vec<StepDescriptor> {
    self.steps
  }
}

impl From<Vec<StepDescriptor>> for WorkSpec {
  fn from(steps: Vec<StepDescriptor>) -> Self {
    WorkSpec::new(steps)
  }
}

impl FromIterator<StepDescriptor> for WorkSpec {
  fn from_iter<I: IntoIterator<Item = StepDescriptor>>(iter: I) -> Self {
    WorkSpec::new(iter.into_iter().collect())
  }
}

/// Shorthand for `WorkSpec::new`.
pub fn work(steps: Vec<StepDescriptor>) -> WorkSpec {
  WorkSpec::new(steps)
}

// Wire form: `{ "type": "work", "steps": [...] }`.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WorkWireRef<'a> {
  Work { steps: &'a [StepDescriptor] },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WorkWire {
  Work {
    #[serde(default)]
    steps: Vec<StepDescriptor>,
  },
}

impl Serialize for WorkSpec {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    WorkWireRef::Work { steps: &self.steps }.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for WorkSpec {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let WorkWire::Work { steps } = WorkWire::deserialize(deserializer)?;
    Ok(WorkSpec { steps })
  }
}
