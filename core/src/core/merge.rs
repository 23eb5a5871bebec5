// crawlwork/src/core/merge.rs

//! Shallow object merge used to stamp step configurations.
//!
//! Keys of every source are copied left to right. A failed assignment does
//! not stop the merge: the first failure is remembered, the remaining keys
//! are still copied, and that first failure is returned at the end.

use crate::error::{WorkError, WorkResult};
use serde_json::{Map, Value};

/// Anything keys can be assigned onto during a merge.
pub trait AssignTarget {
  fn assign(&mut self, key: &str, value: Value) -> WorkResult<()>;
}

impl AssignTarget for Map<String, Value> {
  fn assign(&mut self, key: &str, value: Value) -> WorkResult<()> {
    self.insert(key.to_string(), value);
    Ok(())
  }
}

/// Copies every key of each present source onto `target`, skipping `None`
/// sources. Returns the first assignment failure, if any, after all sources
/// have been processed.
pub fn merge_into<T: AssignTarget + ?Sized>(target: &mut T, sources: &[Option<&Map<String, Value>>]) -> WorkResult<()> {
  let mut pending: Option<WorkError> = None;

  for source in sources.iter().flatten() {
    for (key, value) in source.iter() {
      if let Err(e) = target.assign(key, value.clone()) {
        tracing::trace!(key = %key, error = %e, "merge assignment failed");
        if pending.is_none() {
          pending = Some(e);
        }
      }
    }
  }

  match pending {
    Some(e) => Err(e),
    None => Ok(()),
  }
}

/// Merges `sources` onto a fresh object.
pub fn merge(sources: &[Option<&Map<String, Value>>]) -> Map<String, Value> {
  let mut target = Map::new();
  // assignment onto a `Map` cannot fail
  let _ = merge_into(&mut target, sources);
  target
}
