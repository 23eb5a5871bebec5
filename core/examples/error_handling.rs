// crawlwork/examples/error_handling.rs

use crawlwork::{worktype, work, Executor, ExecutorConfig, StepInput, StepOutcome, UnknownWorktypePolicy, WorkError};
use tracing::{error, info};

// A custom error type raised inside a step handler.
#[derive(Debug, thiserror::Error)]
enum ScrapeError {
  #[error("page returned status {0}")]
  Status(u16),
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Error Handling Example ---");

  info!("\nScenario 1: A step fails, later steps never run");
  run_with_step_failure().await;

  info!("\nScenario 2: Unknown worktype, as executor error and as failed work");
  run_with_unknown_worktype().await;
}

async fn run_with_step_failure() {
  let executor = Executor::new();
  executor.on("fetch", |_input: StepInput| async move { Err::<StepOutcome, _>(anyhow::Error::new(ScrapeError::Status(503))) });
  executor.on("store", |_input: StepInput| async move {
    error!("store must not run after a failure");
    Ok::<_, crawlwork::StepError>(StepOutcome::ok(("stored", true)))
  });

  let spec = work(vec![
    worktype("fetch").build(&Default::default()),
    worktype("store").build(&Default::default()),
  ]);

  match executor.run(&spec, None).await {
    Ok(state) => match state.failed() {
      Some(e) => info!("Work failed as expected: {}", e),
      None => error!("Expected the work to fail, got {:?}", state),
    },
    Err(e) => error!("Executor error: {}", e),
  }
}

async fn run_with_unknown_worktype() {
  let spec = work(vec![worktype("write_directory").build(&Default::default())]);

  match Executor::new().run(&spec, None).await {
    Err(WorkError::WorktypeNotFound { worktype, step_index }) => {
      info!("Executor refused step {}: no handler for '{}'", step_index, worktype)
    }
    other => error!("Unexpected result: {:?}", other),
  }

  let lenient = Executor::with_config(ExecutorConfig::new().with_unknown_worktype(UnknownWorktypePolicy::Fail));
  match lenient.run(&spec, None).await {
    Ok(state) => info!("Lenient executor ended with {:?}", state),
    Err(e) => error!("Unexpected executor error: {}", e),
  }
}
