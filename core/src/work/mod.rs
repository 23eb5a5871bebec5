pub mod builtin;
pub mod definition;
pub mod execution;
pub mod handlers;

pub use builtin::PassThrough;
pub use definition::{work, WorkSpec};
pub use execution::WorkState;
pub use handlers::{Executor, Step, StepHandler, StepInput};
