//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `frontmatter.rs` — YAML frontmatter split/parse.
//! - `validator.rs` — rule document checks and the validation report.
//! - `copier.rs` — copy rules into another directory tree.
//! - `installer.rs` — per-editor install/uninstall with manifests.
//! - `catalog_ops.rs` — maintainer workflows (doctor, index generation).
//! - `authoring.rs` — rule scaffolding mutations.
//! - `storage.rs` — local state/config persistence + audit log.
//! - `output.rs` — JSON/text output helpers and error envelope.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod authoring;
pub mod catalog_ops;
pub mod copier;
pub mod frontmatter;
pub mod installer;
pub mod output;
pub mod storage;
pub mod validator;
