// crawlwork/src/work/builtin.rs

use crate::core::outcome::StepOutcome;
use crate::error::StepError;
use crate::work::handlers::{Step, StepInput};
use async_trait::async_trait;

/// Continues with the incoming package unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl PassThrough {
  pub const WORKTYPE: &'static str = "pass_through";
}

#[async_trait]
impl Step for PassThrough {
  async fn run(&self, input: StepInput) -> Result<StepOutcome, StepError> {
    match input.package {
      Some(package) => Ok(StepOutcome::then(package)),
      None => Err(StepError::new("pass_through requires an input package")),
    }
  }
}
