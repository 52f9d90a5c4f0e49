//! Service layer containing the session/view logic and side-effect helpers.
//!
//! ## Service map
//! - `controller.rs` — session + view state machine driving the gateway.
//! - `screen.rs` — visible view and rendered regions.
//! - `render.rs` — scan result presentation.
//! - `notify.rs` — user notices (alert vs inline).
//! - `config.rs` — config file + gateway URL resolution.
//! - `storage.rs` — session file + audit log.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod controller;
pub mod notify;
pub mod output;
pub mod render;
pub mod screen;
pub mod storage;
