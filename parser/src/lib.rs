//! Parser for Windows service control (`sc.exe`) query output.
//!
//! This crate turns the free-form, column-and-label text the tool prints
//! into the typed records defined by [`sc-status-core`]. It never spawns
//! processes or performs I/O: callers capture the tool's standard output and
//! hand the string here.
//!
//! Listings are parsed with two independent strategies. The primary strategy
//! anchors on the canonical English field labels (`SERVICE_NAME`, `STATE`,
//! ...). When none are present — a non-English display language translates
//! every label — a positional fallback reads each block by line position and
//! recognizes fields by the tool's fixed, language-invariant value tokens
//! (`WIN32_SHARE_PROCESS`, `RUNNING`, ...).
//!
//! # Main entry points
//!
//! - [`parse_service_list`] — a `query`-style listing into
//!   [`ServiceRecord`]s.
//! - [`parse_service_config`] — a `qc` config block into a
//!   [`ServiceConfig`].
//! - [`parse_failure_config`], [`parse_lock`], [`parse_description`],
//!   [`parse_display_name`], [`parse_key_name`], [`parse_descriptor`] — the
//!   other single-record queries.
//! - [`parse_error`] — best-effort extraction of a human-readable error
//!   message from failed invocations.
//!
//! Every operation is total: malformed or truncated input degrades to
//! defaults or an empty listing, never to an error. All functions are pure
//! over their input and safe to call concurrently.
//!
//! # Example
//!
//! ```
//! use sc_status_parser::parse_service_list;
//!
//! let output = "\
//! SERVICE_NAME: wuauserv
//! DISPLAY_NAME: Windows Update
//!         TYPE               : 20  WIN32_SHARE_PROCESS
//!         STATE              : 4  RUNNING
//!                                 (STOPPABLE, NOT_PAUSABLE, ACCEPTS_SHUTDOWN)
//!         WIN32_EXIT_CODE    : 0  (0x0)
//!         SERVICE_EXIT_CODE  : 0  (0x0)
//!         CHECKPOINT         : 0x0
//!         WAIT_HINT          : 0x0
//! ";
//!
//! let services = parse_service_list(output);
//! assert_eq!(services.len(), 1);
//! assert_eq!(services[0].name, "wuauserv");
//! assert!(services[0].state.running);
//! assert_eq!(
//!     services[0].accepted.as_deref().unwrap(),
//!     ["STOPPABLE", "NOT_PAUSABLE", "ACCEPTS_SHUTDOWN"]
//! );
//! ```
//!
//! [`sc-status-core`]: sc_status_core

mod fields;
mod listing;
mod records;

pub use fields::HexPrefixPolicy;
pub use listing::{parse_service_list, parse_service_list_with_policy};
pub use records::{
    parse_description, parse_descriptor, parse_display_name, parse_error, parse_failure_config,
    parse_key_name, parse_lock, parse_service_config, parse_service_config_with_policy,
};

pub use sc_status_core::{
    CodeName, FailureConfig, LockInfo, ServiceConfig, ServiceRecord, ServiceState,
};
