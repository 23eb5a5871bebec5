// crawlwork/src/core/package.rs

//! Defines `Package`, the named payload handed between steps.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
struct PackageInner {
  name: String,
  #[serde(default)]
  content: Value,
}

/// An immutable named unit of content produced by a step.
///
/// Cloning a `Package` clones the handle, not the content: every clone refers
/// to the same instance. Packages have identity (`Package::ptr_eq`) but no
/// equality.
#[derive(Debug, Clone)]
pub struct Package(Arc<PackageInner>);

impl Package {
  /// Builds a package with `name` and `content` set verbatim.
  pub fn new<S: Into<String>, V: Into<Value>>(name: S, content: V) -> Self {
    Package(Arc::new(PackageInner {
      name: name.into(),
      content: content.into(),
    }))
  }

  pub fn name(&self) -> &str {
    &self.0.name
  }

  pub fn content(&self) -> &Value {
    &self.0.content
  }

  /// True if both handles refer to the same package instance.
  pub fn ptr_eq(a: &Package, b: &Package) -> bool {
    Arc::ptr_eq(&a.0, &b.0)
  }
}

impl Serialize for Package {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.0.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Package {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    PackageInner::deserialize(deserializer).map(|inner| Package(Arc::new(inner)))
  }
}

/// Shorthand for `Package::new`.
pub fn package<S: Into<String>, V: Into<Value>>(name: S, content: V) -> Package {
  Package::new(name, content)
}
