// crawlwork/src/core/descriptor.rs

//! Defines `StepDescriptor`, the configuration object describing one step.

use crate::error::WorkError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub const TYPE_KEY: &str = "type";

/// A caller-defined configuration object stamped with a `type`.
///
/// The `type` field is set once, by a `Worktype`, and there is no way to
/// change it afterwards. Other keys are opaque to this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDescriptor {
  fields: Map<String, Value>,
}

impl StepDescriptor {
  /// `fields` must already hold a string under `type`.
  pub(crate) fn from_stamped(fields: Map<String, Value>) -> Self {
    debug_assert!(fields.get(TYPE_KEY).map_or(false, Value::is_string));
    Self { fields }
  }

  /// The worktype this step was stamped with.
  pub fn worktype(&self) -> &str {
    self.fields.get(TYPE_KEY).and_then(Value::as_str).unwrap_or_default()
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.fields.get(key)
  }

  /// Configuration keys other than `type`.
  pub fn options(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.fields.iter().filter(|(k, _)| k.as_str() != TYPE_KEY)
  }

  /// The full object, `type` included.
  pub fn as_map(&self) -> &Map<String, Value> {
    &self.fields
  }

  pub fn to_value(&self) -> Value {
    Value::Object(self.fields.clone())
  }
}

impl TryFrom<Value> for StepDescriptor {
  type Error = WorkError;

  fn try_from(value: Value) -> Result<Self, Self::Error> {
    match value {
      Value::Object(fields) => match fields.get(TYPE_KEY) {
        Some(Value::String(_)) => Ok(StepDescriptor { fields }),
        Some(other) => Err(WorkError::Decode(format!("step 'type' must be a string, got {}", other))),
        None => Err(WorkError::Decode("step descriptor has no 'type'".to_string())),
      },
      other => Err(WorkError::Decode(format!("step descriptor must be an object, got {}", other))),
    }
  }
}

impl Serialize for StepDescriptor {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.fields.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for StepDescriptor {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    StepDescriptor::try_from(value).map_err(serde::de::Error::custom)
  }
}
