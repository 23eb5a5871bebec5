pub mod descriptor;
pub mod merge;
pub mod outcome;
pub mod package;

// Re-export key types for easier access from other crawlwork modules (and lib.rs)
pub use descriptor::StepDescriptor;
pub use merge::{merge, merge_into, AssignTarget};
pub use outcome::{PackageSource, StepOutcome};
pub use package::{package, Package};
