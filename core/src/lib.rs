//! Typed records for Windows service control (`sc.exe`) query output.
//!
//! This crate defines the value types that [`sc-status-parser`] assembles
//! from captured tool output:
//!
//! - [`ServiceRecord`] — one service from a listing query (name, state,
//!   exit codes, optional PID and accepted controls).
//! - [`ServiceConfig`] — static configuration from a config query.
//! - [`FailureConfig`] — failure-recovery policy.
//! - [`LockInfo`] — service database lock status.
//! - [`CodeName`] / [`ServiceState`] — the `<code>  <NAME>` pairs the tool
//!   prints for enumerated fields, with derived state booleans.
//!
//! All types are plain immutable values with [`serde`] derives; nothing here
//! performs I/O or holds process-wide state.
//!
//! # Example
//!
//! ```
//! use sc_status_core::{CodeName, ServiceState};
//!
//! let state = ServiceState::from_code(4, "RUNNING");
//! assert!(state.running);
//! assert!(!state.stopped);
//!
//! let service_type = CodeName::new(32, "WIN32_SHARE_PROCESS");
//! assert_eq!(service_type.name, "WIN32_SHARE_PROCESS");
//! ```
//!
//! [`sc-status-parser`]: https://crates.io/crates/sc-status-parser

mod types;

pub use types::*;
