//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep DTO/report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — summaries, reports, manifests, state, config structs.
//! - `constants.rs` — stable constants (file names, limits, markers).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and integration
//! contracts. Keep schema-impacting changes explicit and synchronized with
//! `docs/contracts/*`.

pub mod constants;
pub mod models;
