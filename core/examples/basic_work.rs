// crawlwork/examples/basic_work.rs

use crawlwork::{worktype, work, Executor, ExecutorConfig, Package, StepError, StepInput, StepOutcome, WorkState};
use serde_json::json;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), crawlwork::WorkError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Work Example ---");

  // 1. Describe the steps. Any worktype name is accepted here; the executor
  //    decides later which ones it can run.
  let spec = work(vec![
    worktype("fetch").build(&json!({"url": "https://loppen.dk"}).as_object().cloned().unwrap_or_default()),
    worktype("pass_through").build(&Default::default()),
    worktype("extract").build(&json!({"selector": "h1"}).as_object().cloned().unwrap_or_default()),
  ]);
  info!("Declared work: {}", serde_json::to_string(&spec).unwrap_or_default());

  // 2. Register behaviour for the worktypes used.
  let executor = Executor::with_builtins(ExecutorConfig::from_env()?);

  executor.on("fetch", |input: StepInput| async move {
    let url = input.descriptor.get("url").cloned().unwrap_or_default();
    info!("fetching {}", url);
    Ok::<_, StepError>(StepOutcome::then(("html", "<h1>Concert tonight</h1>")))
  });

  executor.on("extract", |input: StepInput| async move {
    let html = match input.package {
      Some(p) => p.content().as_str().unwrap_or_default().to_string(),
      None => return Ok(StepOutcome::err("extract needs html")),
    };
    let title = html.trim_start_matches("<h1>").trim_end_matches("</h1>").to_string();
    Ok::<_, StepError>(StepOutcome::ok(("title", title)))
  });

  // 3. Run it.
  let state = executor.run(&spec, Some(Package::new("seed", json!(null)))).await?;
  match state {
    WorkState::Succeeded(package) => info!("Work succeeded: {} = {}", package.name(), package.content()),
    WorkState::Failed(error) => info!("Work failed: {}", error),
    WorkState::Running { index, .. } => info!("Work did not run (stopped at {})", index),
  }

  Ok(())
}
