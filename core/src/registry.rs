// crawlwork/src/registry.rs

//! Defines `WorktypeRegistry`, an open-ended factory of step-descriptor
//! constructors keyed by worktype name.
//!
//! There is no fixed list of worktypes. Asking for any name yields a
//! constructor; whether the name means anything is decided later by the
//! executor that interprets `type`.

use crate::core::descriptor::{StepDescriptor, TYPE_KEY};
use crate::core::merge::merge;
use crate::error::{WorkError, WorkResult};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{event, Level};

/// Constructor for step descriptors of one worktype.
#[derive(Clone)]
pub struct Worktype {
  name: Arc<str>,
  stamp: Arc<Map<String, Value>>,
}

impl Worktype {
  fn new(name: &str) -> Self {
    let mut stamp = Map::new();
    stamp.insert(TYPE_KEY.to_string(), Value::String(name.to_string()));
    Self {
      name: Arc::from(name),
      stamp: Arc::new(stamp),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Returns a shallow copy of `config` with `type` set to this worktype,
  /// overwriting any `type` already present.
  pub fn build(&self, config: &Map<String, Value>) -> StepDescriptor {
    StepDescriptor::from_stamped(merge(&[Some(config), Some(&self.stamp)]))
  }

  /// Like `build`, for a loosely typed configuration. `null` counts as an
  /// empty configuration; anything other than an object is rejected.
  pub fn build_value(&self, config: &Value) -> WorkResult<StepDescriptor> {
    match config {
      Value::Object(map) => Ok(self.build(map)),
      Value::Null => Ok(self.build(&Map::new())),
      other => Err(WorkError::Configuration(format!(
        "configuration for worktype '{}' must be an object, got {}",
        self.name, other
      ))),
    }
  }

  /// True if both constructors come from the same registry entry.
  pub fn ptr_eq(a: &Worktype, b: &Worktype) -> bool {
    Arc::ptr_eq(&a.name, &b.name)
  }
}

impl fmt::Debug for Worktype {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Worktype").field("name", &self.name).finish()
  }
}

/// Lazily populated map of worktype constructors.
#[derive(Default)]
pub struct WorktypeRegistry {
  entries: Mutex<HashMap<String, Worktype>>,
}

impl WorktypeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the constructor for `name`, creating it on first access.
  pub fn worktype(&self, name: &str) -> Worktype {
    let mut entries = self.entries.lock();
    if let Some(existing) = entries.get(name) {
      return existing.clone();
    }
    event!(Level::TRACE, worktype = name, "Creating worktype constructor.");
    let created = Worktype::new(name);
    entries.insert(name.to_string(), created.clone());
    created
  }

  /// Shorthand for `self.worktype(name).build(config)`.
  pub fn build(&self, name: &str, config: &Map<String, Value>) -> StepDescriptor {
    self.worktype(name).build(config)
  }

  /// Names accessed so far, sorted.
  pub fn known(&self) -> Vec<String> {
    let mut names: Vec<String> = self.entries.lock().keys().cloned().collect();
    names.sort();
    names
  }
}

impl fmt::Debug for WorktypeRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WorktypeRegistry").field("known", &self.known()).finish()
  }
}

static DEFAULT_REGISTRY: OnceLock<WorktypeRegistry> = OnceLock::new();

/// The process-wide registry behind `worktype()`.
pub fn default_registry() -> &'static WorktypeRegistry {
  DEFAULT_REGISTRY.get_or_init(WorktypeRegistry::new)
}

/// Constructor for `name` from the process-wide registry.
pub fn worktype(name: &str) -> Worktype {
  default_registry().worktype(name)
}
