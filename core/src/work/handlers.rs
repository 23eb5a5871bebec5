// crawlwork/src/work/handlers.rs

//! Defines how step behaviour is plugged into an `Executor`: the `Step`
//! trait, the closure-based `StepHandler`, and the methods registering them
//! against worktype names.

use crate::config::ExecutorConfig;
use crate::core::descriptor::StepDescriptor;
use crate::core::outcome::StepOutcome;
use crate::core::package::Package;
use crate::error::StepError;
use crate::work::builtin::PassThrough;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{event, Level};

/// Everything a step gets to see when it runs.
#[derive(Debug, Clone)]
pub struct StepInput {
  /// Zero-based position of the step in its `WorkSpec`.
  pub index: usize,
  pub descriptor: StepDescriptor,
  /// The package carried forward by the previous `Then`, or the initial one.
  pub package: Option<Package>,
}

/// Behaviour behind one worktype.
///
/// Returning `Err(e)` is the same as returning `Ok(StepOutcome::Err { error: e })`.
#[async_trait]
pub trait Step: Send + Sync {
  async fn run(&self, input: StepInput) -> Result<StepOutcome, StepError>;
}

/// Type alias for a closure-based step handler.
pub type StepHandler =
  Box<dyn Fn(StepInput) -> Pin<Box<dyn Future<Output = Result<StepOutcome, StepError>> + Send>> + Send + Sync>;

struct FnStep(StepHandler);

#[async_trait]
impl Step for FnStep {
  async fn run(&self, input: StepInput) -> Result<StepOutcome, StepError> {
    (self.0)(input).await
  }
}

/// Reference executor for `WorkSpec`s. Maps worktype names to `Step`s and
/// drives the step state machine (see `execution.rs`).
pub struct Executor {
  pub(crate) config: ExecutorConfig,
  pub(crate) handlers: RwLock<HashMap<String, Arc<dyn Step>>>,
}

impl Executor {
  /// Creates an executor with the default config and no handlers.
  pub fn new() -> Self {
    Self::with_config(ExecutorConfig::default())
  }

  pub fn with_config(config: ExecutorConfig) -> Self {
    Self {
      config,
      handlers: RwLock::new(HashMap::new()),
    }
  }

  /// Creates an executor with the built-in worktypes registered.
  pub fn with_builtins(config: ExecutorConfig) -> Self {
    let executor = Self::with_config(config);
    executor.register(PassThrough::WORKTYPE, PassThrough);
    executor
  }

  pub fn config(&self) -> &ExecutorConfig {
    &self.config
  }

  /// Registers `step` for `worktype`, replacing any previous handler.
  pub fn register<S: Step + 'static>(&self, worktype: &str, step: S) {
    event!(Level::DEBUG, worktype = worktype, "Registering step handler.");
    let previous = self
      .handlers
      .write()
      .insert(worktype.to_string(), Arc::new(step));
    if previous.is_some() {
      event!(Level::DEBUG, worktype = worktype, "Replaced existing step handler.");
    }
  }

  /// Registers an async closure for `worktype`.
  ///
  /// Errors returned by the closure are converted into `StepError`s.
  pub fn on<F, UserProvidedErr>(&self, worktype: &str, handler_fn: impl Fn(StepInput) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<StepOutcome, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<StepError> + Send + 'static,
  {
    let final_handler: StepHandler = Box::new(move |input| {
      let user_fut = handler_fn(input);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.register(worktype, FnStep(final_handler));
  }

  pub fn handles(&self, worktype: &str) -> bool {
    self.handlers.read().contains_key(worktype)
  }

  pub(crate) fn handler(&self, worktype: &str) -> Option<Arc<dyn Step>> {
    self.handlers.read().get(worktype).cloned()
  }
}

impl Default for Executor {
  fn default() -> Self {
    Self::new()
  }
}
