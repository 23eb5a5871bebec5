// src/lib.rs

//! crawlwork: the step/result protocol spoken between crawl orchestration
//! and sandboxed scripts.
//!
//! crawlwork describes multi-step work with:
//!  - Named, immutable content `Package`s.
//!  - Tagged step outcomes: `ok` (stop with a package), `err` (stop with an
//!    error) and `then` (continue with a package).
//!  - `WorkSpec`s, ordered step pipelines, and a reference `Executor` that
//!    drives them through the step state machine.
//!  - An open-ended worktype registry that stamps arbitrary step
//!    configurations with a `type`.
//!  - Decoding of the values scripts return to the executor.

pub mod config;
pub mod core;
pub mod error;
pub mod registry;
pub mod wire;
pub mod work;

// --- Re-exports for the Public API ---

pub use crate::core::descriptor::StepDescriptor;
pub use crate::core::merge::{merge, merge_into, AssignTarget};
pub use crate::core::outcome::{PackageSource, StepOutcome};
pub use crate::core::package::{package, Package};

pub use crate::work::builtin::PassThrough;
pub use crate::work::definition::{work, WorkSpec};
pub use crate::work::execution::WorkState;
pub use crate::work::handlers::{Executor, Step, StepHandler, StepInput};

pub use crate::registry::{default_registry, worktype, Worktype, WorktypeRegistry};

pub use crate::config::{ExecutorConfig, UnknownWorktypePolicy};
pub use crate::error::{StepError, WorkError, WorkResult};

pub use crate::wire::{decode_outcome, decode_outcomes, decode_script_value, encode_outcome, ScriptValue};

/*
    Typical flow:
    1. Describe steps with `worktype("http").build(&config)`.
    2. Collect them into a `WorkSpec` with `work(steps)`.
    3. Register a `Step` (or an async closure via `Executor::on`) for each
       worktype used.
    4. `executor.run(&work, initial_package).await` returns the terminal
       `WorkState`: `Succeeded(package)` or `Failed(error)`.
*/
