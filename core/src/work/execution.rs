// crawlwork/src/work/execution.rs

//! Contains the step state machine and `Executor::run()`, which drives a
//! `WorkSpec` through it.
//!
//! Steps run strictly in order. `Ok` ends the work successfully, `Err` ends
//! it with a failure, and `Then` moves on to the next step carrying the new
//! package. A `Then` from the last step is an implicit success.

use crate::config::UnknownWorktypePolicy;
use crate::core::outcome::StepOutcome;
use crate::core::package::Package;
use crate::error::{StepError, WorkError, WorkResult};
use crate::work::definition::WorkSpec;
use crate::work::handlers::{Executor, StepInput};
use tracing::{event, instrument, span, Instrument, Level};

/// Where a work execution stands.
#[derive(Debug)]
pub enum WorkState {
  /// About to run the step at `index` with `package` as its input.
  Running { index: usize, package: Option<Package> },
  Succeeded(Package),
  Failed(StepError),
}

impl WorkState {
  /// The initial state: first step, caller-supplied package.
  pub fn start(initial: Option<Package>) -> Self {
    WorkState::Running {
      index: 0,
      package: initial,
    }
  }

  /// Applies the outcome of the current step. `len` is the number of steps
  /// in the work. Terminal states are returned unchanged.
  pub fn advance(self, outcome: StepOutcome, len: usize) -> Self {
    let index = match self {
      WorkState::Running { index, .. } => index,
      terminal => return terminal,
    };

    match outcome {
      StepOutcome::Ok { package } => WorkState::Succeeded(package),
      StepOutcome::Err { error } => WorkState::Failed(error),
      StepOutcome::Then { package } => {
        if index + 1 < len {
          WorkState::Running {
            index: index + 1,
            package: Some(package),
          }
        } else {
          WorkState::Succeeded(package)
        }
      }
    }
  }

  pub fn is_terminal(&self) -> bool {
    !matches!(self, WorkState::Running { .. })
  }

  pub fn succeeded(&self) -> Option<&Package> {
    match self {
      WorkState::Succeeded(package) => Some(package),
      _ => None,
    }
  }

  pub fn failed(&self) -> Option<&StepError> {
    match self {
      WorkState::Failed(error) => Some(error),
      _ => None,
    }
  }
}

impl Executor {
  /// Executes `work`, starting from `initial`.
  ///
  /// Returns the terminal `WorkState`. An empty `work` has no effect and
  /// returns the initial `Running` state untouched. `WorkError` is reserved
  /// for executor faults: a refused work (`max_steps`) or an unknown
  /// worktype under `UnknownWorktypePolicy::Error`.
  #[instrument(
        name = "Executor::run",
        skip_all,
        fields(num_steps = work.len()),
        err(Display)
    )]
  pub async fn run(&self, work: &WorkSpec, initial: Option<Package>) -> WorkResult<WorkState> {
    if let Some(max_steps) = self.config.max_steps {
      if work.len() > max_steps {
        event!(Level::ERROR, max_steps, "Work exceeds the configured step limit.");
        return Err(WorkError::Configuration(format!(
          "work has {} steps, limit is {}",
          work.len(),
          max_steps
        )));
      }
    }

    let len = work.len();
    let mut state = WorkState::start(initial);
    if len == 0 {
      event!(Level::DEBUG, "Work has no steps, nothing to run.");
      return Ok(state);
    }

    event!(Level::DEBUG, "Work execution starting.");

    loop {
      let (index, package) = match state {
        WorkState::Running { index, package } => (index, package),
        terminal => {
          event!(Level::DEBUG, succeeded = terminal.succeeded().is_some(), "Work execution finished.");
          return Ok(terminal);
        }
      };

      let descriptor = &work.steps()[index];
      let worktype = descriptor.worktype();

      let step_span = span!(
        Level::INFO,
        "work_step_execution",
        step_index = index,
        worktype = worktype
      );

      let handler = match self.handler(worktype) {
        Some(handler) => handler,
        None => match self.config.unknown_worktype {
          UnknownWorktypePolicy::Error => {
            event!(Level::ERROR, step_index = index, worktype = worktype, "No handler for worktype.");
            return Err(WorkError::WorktypeNotFound {
              worktype: worktype.to_string(),
              step_index: index,
            });
          }
          UnknownWorktypePolicy::Fail => {
            event!(Level::WARN, step_index = index, worktype = worktype, "No handler for worktype, failing work.");
            state = WorkState::Failed(StepError::new(format!("unknown worktype: {}", worktype)));
            continue;
          }
        },
      };

      let input = StepInput {
        index,
        descriptor: descriptor.clone(),
        package: package.clone(),
      };

      let outcome = handler
        .run(input)
        .instrument(step_span.clone())
        .await
        .unwrap_or_else(|error| StepOutcome::Err { error });

      step_span.in_scope(|| match &outcome {
        StepOutcome::Ok { package } => event!(Level::DEBUG, package = package.name(), "Step returned ok."),
        StepOutcome::Then { package } => event!(Level::TRACE, package = package.name(), "Step returned then."),
        StepOutcome::Err { error } => event!(Level::ERROR, error = %error, "Step returned err, stopping work."),
      });

      state = WorkState::Running { index, package }.advance(outcome, len);
    }
  }
}
