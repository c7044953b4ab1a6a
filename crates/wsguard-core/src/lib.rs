//! wsguard core - shared functionality for the workspace-bounded commands
//!
//! "Stay inside the project."
//!
//! Every command (`wcd`, `wmv`, `wrm`) answers the same two questions before
//! touching the filesystem: where is the workspace root, and is this path
//! inside it? This crate owns both answers plus the validated plans each
//! command executes.

pub mod check;
pub mod cli;
pub mod containment;
pub mod error;
pub mod format;
pub mod invocation;
pub mod logging;
pub mod ops;
pub mod resolve;
pub mod shell;
pub mod workspace;

pub use containment::{is_within, relative_to};
pub use error::{WsError, WsResult};
pub use invocation::Invocation;
pub use workspace::{find_workspace_root, Marker, WorkspaceRoot};
