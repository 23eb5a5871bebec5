// crawlwork/src/wire.rs

//! Decoding of the values sandboxed scripts hand back to the executor.
//!
//! Outcomes travel as `{ "type": "ok" | "then", "package": { "name", "content" } }`
//! or `{ "type": "err", "error": ... }`, work declarations as
//! `{ "type": "work", "steps": [...] }`. A script may return a single value
//! or an array of them.

use crate::core::outcome::StepOutcome;
use crate::error::{StepError, WorkError, WorkResult};
use crate::work::definition::WorkSpec;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

impl Serialize for StepError {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("message", self.message())?;
    map.end()
  }
}

// Accepts `null`, a bare message string, or an object with a `message`.
impl<'de> Deserialize<'de> for StepError {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct StepErrorVisitor;

    impl<'de> Visitor<'de> for StepErrorVisitor {
      type Value = StepError;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, an error message, or an object with a 'message' field")
      }

      fn visit_unit<E: de::Error>(self) -> Result<StepError, E> {
        Ok(StepError::default())
      }

      fn visit_none<E: de::Error>(self) -> Result<StepError, E> {
        Ok(StepError::default())
      }

      fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<StepError, D::Error> {
        deserializer.deserialize_any(self)
      }

      fn visit_str<E: de::Error>(self, message: &str) -> Result<StepError, E> {
        Ok(StepError::new(message))
      }

      fn visit_string<E: de::Error>(self, message: String) -> Result<StepError, E> {
        Ok(StepError::new(message))
      }

      fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<StepError, A::Error> {
        let mut message: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
          if key == "message" {
            message = map.next_value::<Option<String>>()?;
          } else {
            map.next_value::<de::IgnoredAny>()?;
          }
        }
        Ok(StepError::from(message))
      }
    }

    deserializer.deserialize_any(StepErrorVisitor)
  }
}

/// A top-level value returned by a script.
#[derive(Debug)]
pub enum ScriptValue {
  Outcome(StepOutcome),
  Work(WorkSpec),
}

fn tag_of(value: &Value) -> WorkResult<&str> {
  match value {
    Value::Object(map) => match map.get("type") {
      Some(Value::String(tag)) => Ok(tag.as_str()),
      Some(other) => Err(WorkError::Decode(format!("'type' must be a string, got {}", other))),
      None => Err(WorkError::Decode("value has no 'type'".to_string())),
    },
    other => Err(WorkError::Decode(format!("expected an object, got {}", other))),
  }
}

/// Decodes one outcome object.
pub fn decode_outcome(value: &Value) -> WorkResult<StepOutcome> {
  match tag_of(value)? {
    "ok" | "err" | "then" => Ok(StepOutcome::deserialize(value)?),
    other => Err(WorkError::Decode(format!("unknown outcome type '{}'", other))),
  }
}

/// Decodes either a single outcome or an array of outcomes.
pub fn decode_outcomes(value: &Value) -> WorkResult<Vec<StepOutcome>> {
  match value {
    Value::Array(items) => items.iter().map(decode_outcome).collect(),
    single => Ok(vec![decode_outcome(single)?]),
  }
}

/// Decodes an outcome or a work declaration.
pub fn decode_script_value(value: &Value) -> WorkResult<ScriptValue> {
  match tag_of(value)? {
    "work" => Ok(ScriptValue::Work(WorkSpec::deserialize(value)?)),
    _ => decode_outcome(value).map(ScriptValue::Outcome),
  }
}

/// Encodes an outcome into its wire form.
pub fn encode_outcome(outcome: &StepOutcome) -> WorkResult<Value> {
  Ok(serde_json::to_value(outcome)?)
}
