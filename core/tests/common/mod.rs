// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use crawlwork::{Package, StepError, StepInput, StepOutcome};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Helper for Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static STEP_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  STEP_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

/// What a recorded step saw: its index and the name/content of its input.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
  pub index: usize,
  pub input: Option<(String, Value)>,
}

/// Shared log of step invocations.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Seen>>>);

impl Recorder {
  pub fn seen(&self) -> Vec<Seen> {
    self.0.lock().clone()
  }

  fn record(&self, input: &StepInput) {
    self.0.lock().push(Seen {
      index: input.index,
      input: input
        .package
        .as_ref()
        .map(|p| (p.name().to_string(), p.content().clone())),
    });
  }
}

pub type BoxedStepFuture = Pin<Box<dyn Future<Output = Result<StepOutcome, StepError>> + Send>>;

/// A handler that records its input and replies with the next scripted
/// outcome. Each call to the returned closure pops one outcome.
pub fn scripted_handler(
  recorder: Recorder,
  outcomes: Vec<StepOutcome>,
) -> impl Fn(StepInput) -> BoxedStepFuture + Send + Sync + 'static {
  let queue = Arc::new(Mutex::new(VecDeque::from(outcomes)));
  move |input: StepInput| -> BoxedStepFuture {
    let recorder = recorder.clone();
    let queue = queue.clone();
    Box::pin(async move {
      STEP_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
      recorder.record(&input);
      let next = queue.lock().pop_front();
      tracing::debug!(target: "test_handlers", index = input.index, "scripted step executed");
      next.ok_or_else(|| StepError::new("scripted handler ran out of outcomes"))
    })
  }
}

pub fn config(value: Value) -> Map<String, Value> {
  match value {
    Value::Object(map) => map,
    other => panic!("expected a JSON object, got {}", other),
  }
}

pub fn empty_config() -> Map<String, Value> {
  config(json!({}))
}

pub fn package_parts(package: &Package) -> (String, Value) {
  (package.name().to_string(), package.content().clone())
}
