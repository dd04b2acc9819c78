//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs` — doctor/index/author command trees.
//! - `runtime.rs` — list/search/show/validate/copy/install/installs.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

pub use admin::handle_admin_commands;
pub use runtime::handle_runtime_commands;
