//! The three workspace-bounded operations
//!
//! Each operation is split into a `plan` step that validates everything and
//! mutates nothing, and an `execute` step on the validated plan.

pub mod chdir;
pub mod mv;
pub mod rm;
