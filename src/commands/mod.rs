//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `account.rs` — register/login/logout/whoami.
//! - `scan.rs` — scan/status.
//! - `shell.rs` — interactive session over one controller.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate session and view logic to `services::controller`.
//! - Keep behavior and output schema stable.

pub mod account;
pub mod scan;
pub mod shell;

use crate::gateway::HttpGateway;
use crate::services::controller::Controller;
use crate::services::notify::ConsoleNotifier;

pub type ShieldController = Controller<HttpGateway, ConsoleNotifier>;

pub use account::handle_account_commands;
pub use scan::handle_scan_commands;
pub use shell::run_shell;
