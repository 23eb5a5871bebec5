// tests/outcome_tests.rs
mod common;

use common::*;
use crawlwork::{package, Package, PackageSource, StepError, StepOutcome};
use serde_json::{json, Value};
use std::error::Error as _;

#[test]
fn test_package_keeps_name_and_content_verbatim() {
  let p = Package::new("article", json!({"title": "Loppen", "tags": ["a", "b"]}));
  assert_eq!(p.name(), "article");
  assert_eq!(p.content(), &json!({"title": "Loppen", "tags": ["a", "b"]}));

  // No coercion of the name, even when empty.
  let empty = package("", Value::Null);
  assert_eq!(empty.name(), "");
  assert_eq!(empty.content(), &Value::Null);
}

#[test]
fn test_package_clones_share_identity() {
  let p = Package::new("x", 1);
  let same = p.clone();
  let other = Package::new("x", 1);
  assert!(Package::ptr_eq(&p, &same));
  assert!(!Package::ptr_eq(&p, &other));
}

#[test]
fn test_ok_reuses_an_existing_package() {
  let p = Package::new("final", "body");
  let outcome = StepOutcome::ok(p.clone());
  match &outcome {
    StepOutcome::Ok { package } => assert!(Package::ptr_eq(package, &p)),
    other => panic!("Expected Ok, got {:?}", other),
  }
  assert_eq!(outcome.tag(), "ok");
  assert!(outcome.is_terminal());
}

#[test]
fn test_ok_and_then_build_from_parts() {
  let ok = StepOutcome::ok(("z", 3));
  assert_eq!(package_parts(ok.package().unwrap()), ("z".to_string(), json!(3)));

  let then = StepOutcome::then_parts("y", json!([1, 2]));
  assert_eq!(then.tag(), "then");
  assert!(!then.is_terminal());
  assert_eq!(package_parts(then.package().unwrap()), ("y".to_string(), json!([1, 2])));
}

#[test]
fn test_then_reuses_an_existing_package() {
  let p = Package::new("carry", "on");
  let outcome = StepOutcome::then(PackageSource::Built(p.clone()));
  assert!(Package::ptr_eq(outcome.package().unwrap(), &p));
  assert!(outcome.error().is_none());
}

#[test]
fn test_err_wraps_a_message() {
  let outcome = StepOutcome::err("boom");
  assert_eq!(outcome.tag(), "err");
  assert!(outcome.package().is_none());
  let error = outcome.error().unwrap();
  assert_eq!(error.message(), "boom");
  assert_eq!(error.to_string(), "boom");

  let owned = StepOutcome::err(String::from("owned boom"));
  assert_eq!(owned.error().unwrap().message(), "owned boom");
}

#[test]
fn test_err_keeps_a_prebuilt_error() {
  let inner = anyhow::anyhow!("connection reset");
  let error = StepError::from_source(inner);
  let outcome = StepOutcome::err(error);
  let error = outcome.error().unwrap();
  assert_eq!(error.message(), "connection reset");
  assert!(error.source_error().is_some());
  assert!(error.source().is_some());
}

#[test]
fn test_err_without_an_error_still_carries_one() {
  let outcome = StepOutcome::err(None::<&str>);
  match outcome {
    StepOutcome::Err { error } => {
      assert_eq!(error.message(), "");
      assert!(error.source_error().is_none());
    }
    other => panic!("Expected Err, got {:?}", other),
  }
}
