//! Record definitions for service control query output.
//!
//! This module defines the typed model that the parser crates assemble from
//! raw `sc.exe` text. The types are designed for serialization with [`serde`]
//! and round-trip cleanly through JSON for consumption by monitoring or
//! orchestration layers.

use serde::{Deserialize, Serialize};

/// Service state code for a stopped service.
pub const STATE_STOPPED: i64 = 1;
/// Service state code for a running service.
pub const STATE_RUNNING: i64 = 4;
/// Service state code for a paused service.
pub const STATE_PAUSED: i64 = 7;

/// The tool's fixed service-type value tokens.
///
/// These appear verbatim in the value column of a `TYPE` line regardless of
/// the OS display language, which is what makes locale-independent parsing
/// possible.
pub const SERVICE_TYPE_TOKENS: [&str; 5] = [
    "KERNEL_DRIVER",
    "FILE_SYSTEM_DRIVER",
    "WIN32_OWN_PROCESS",
    "WIN32_SHARE_PROCESS",
    "INTERACTIVE_PROCESS",
];

/// The tool's fixed service-state value tokens, indexed by `code - 1`.
pub const SERVICE_STATE_TOKENS: [&str; 7] = [
    "STOPPED",
    "START_PENDING",
    "STOP_PENDING",
    "RUNNING",
    "CONTINUE_PENDING",
    "PAUSE_PENDING",
    "PAUSED",
];

/// A numeric enumeration value paired with its human-readable label.
///
/// The tool prints several fields as `<code>  <NAME>` on a single line
/// (service type, start type, error control, state); both halves come from
/// the same source field so they stay consistent with each other.
///
/// # Examples
///
/// ```
/// use sc_status_core::CodeName;
///
/// let ty = CodeName::new(16, "WIN32_OWN_PROCESS");
/// assert_eq!(ty.code, 16);
///
/// let absent = CodeName::default();
/// assert_eq!(absent.code, 0);
/// assert!(absent.name.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CodeName {
    /// Numeric enumeration value (0 when absent from the input).
    pub code: i64,
    /// Human-readable label (empty when absent from the input).
    pub name: String,
}

impl CodeName {
    /// Creates a code/name pair.
    pub fn new(code: i64, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// Current state of a service, with convenience booleans derived from the
/// numeric code.
///
/// Exactly one of `running`/`paused`/`stopped` is true when the code is 4, 7,
/// or 1 respectively; all three are false for the pending codes (2, 3, 5, 6)
/// and for anything unrecognized.
///
/// # Examples
///
/// ```
/// use sc_status_core::ServiceState;
///
/// let state = ServiceState::from_code(4, "RUNNING");
/// assert!(state.running);
/// assert!(!state.paused && !state.stopped);
///
/// let pending = ServiceState::from_code(2, "START_PENDING");
/// assert!(!pending.running && !pending.paused && !pending.stopped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceState {
    /// Numeric state code (1 through 7 in well-formed output).
    pub code: i64,
    /// State label as printed by the tool (e.g. `RUNNING`).
    pub name: String,
    /// True exactly when `code == 4`.
    pub running: bool,
    /// True exactly when `code == 7`.
    pub paused: bool,
    /// True exactly when `code == 1`.
    pub stopped: bool,
}

impl ServiceState {
    /// Creates a state from its numeric code and label, deriving the three
    /// convenience booleans.
    pub fn from_code(code: i64, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            running: code == STATE_RUNNING,
            paused: code == STATE_PAUSED,
            stopped: code == STATE_STOPPED,
        }
    }
}

/// Lock status of the service control manager database.
///
/// `owner` and `duration` are meaningful only when `locked` is true, but are
/// always present (possibly empty/zero) for uniform access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LockInfo {
    /// Whether the database is currently locked.
    pub locked: bool,
    /// Account holding the lock (empty when unlocked).
    pub owner: String,
    /// How long the lock has been held, in seconds.
    pub duration: i64,
}

/// Failure-recovery configuration for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FailureConfig {
    /// Seconds with no failures after which the failure count resets.
    pub reset_period: i64,
    /// Message broadcast before a reboot action.
    pub reboot_message: String,
    /// Command line run on failure.
    pub command_line: String,
    /// Raw failure-action description (e.g. `RESTART -- Delay = 60000`).
    pub failure_actions: String,
}

/// Static configuration of a service as reported by a config query.
///
/// # Examples
///
/// ```
/// use sc_status_core::ServiceConfig;
///
/// let config = ServiceConfig::default();
/// assert_eq!(config.tag, 0);
/// assert!(config.dependencies.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// Service type (`TYPE`).
    pub service_type: CodeName,
    /// Start type (`START_TYPE`).
    pub start_type: CodeName,
    /// Error control level (`ERROR_CONTROL`).
    pub error_control: CodeName,
    /// Path to the service binary.
    pub bin_path: String,
    /// Load-order group the service belongs to.
    pub load_order_group: String,
    /// Tag within the load-order group (0 when none).
    pub tag: i64,
    /// Display name.
    pub display_name: String,
    /// Services this service depends on, in listing order.
    pub dependencies: Vec<String>,
    /// Account the service runs under.
    pub service_start_name: String,
}

/// One service as reported by a listing query.
///
/// `accepted`, `pid`, and `flags` are attached only when the corresponding
/// field exists in the source text; they are not defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceRecord {
    /// Key name of the service (`SERVICE_NAME`).
    pub name: String,
    /// Display name (`DISPLAY_NAME`).
    pub display_name: String,
    /// Service type.
    pub service_type: CodeName,
    /// Current state with derived booleans.
    pub state: ServiceState,
    /// Win32 exit code reported for the service.
    pub win32_exit_code: i64,
    /// Service-specific exit code.
    pub service_exit_code: i64,
    /// Checkpoint value (printed by the tool with a `0x` prefix).
    pub checkpoint: i64,
    /// Wait hint in milliseconds (printed by the tool with a `0x` prefix).
    pub wait_hint: i64,
    /// Control codes the service accepts (e.g. `STOP`, `PAUSE_CONTINUE`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<Vec<String>>,
    /// Process ID, when the listing includes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    /// Raw `FLAGS` value, when present and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}
