//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep session, view and gateway wire types in one place.
//! - Make `--json` output and request body changes explicit and reviewable.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Request structs mirror the gateway's JSON contract and `ScanResult` is read
//! as the gateway sends it. Keep `docs/contracts/*` in sync with output changes.

pub mod models;
