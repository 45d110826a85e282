//! Record assemblers for single-service query output.
//!
//! Each function here is a pure transform from one block of captured tool
//! output to one typed record. They are all total: absent fields degrade to
//! defaults or empty values, and none of them can fail.

use regex::Regex;
use std::sync::LazyLock;

use crate::fields::{
    self, HexPrefixPolicy, array_value, boolean_value, code_name_value, field_value, numeric_value,
    numeric_value_hex,
};
use sc_status_core::{CodeName, FailureConfig, LockInfo, ServiceConfig};

/// Extracts a human-readable error message from tool output.
///
/// Three tiers: an explicit `ERROR` field wins; otherwise the line after a
/// bracketed `[SC]` banner is used; otherwise the input comes back unchanged
/// so callers always have a non-empty diagnostic when the tool said anything
/// at all.
///
/// # Examples
///
/// ```
/// use sc_status_parser::parse_error;
///
/// let output = "[SC] EnumQueryServicesStatus FAILED 5:\nAccess is denied.\n";
/// assert_eq!(parse_error(output), "Access is denied.");
/// assert_eq!(parse_error(""), "");
/// ```
pub fn parse_error(output: &str) -> String {
    static BANNER_TAIL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\[SC\].*\s*(.*)").expect("static regex must compile"));

    fields::field_capture(output, "ERROR")
        .filter(|message| !message.is_empty())
        .or_else(|| {
            BANNER_TAIL_RE
                .captures(output)
                .and_then(|captures| captures.get(1))
                .map(|group| group.as_str().trim().to_string())
                .filter(|message| !message.is_empty())
        })
        .unwrap_or_else(|| output.to_string())
}

/// Extracts the display name from a display-name query, falling back to the
/// whole output when the `Name` field is absent.
pub fn parse_display_name(output: &str) -> String {
    field_value(output, "Name", output)
}

/// Extracts the key name from a key-name query. Same shape as
/// [`parse_display_name`]; the tool prints `Name = <value>` for both queries.
pub fn parse_key_name(output: &str) -> String {
    field_value(output, "Name", output)
}

/// Extracts the description text from a description query.
pub fn parse_description(output: &str) -> String {
    field_value(output, "DESCRIPTION", output)
}

/// Extracts a security descriptor string: the first non-blank line of the
/// output, trimmed.
///
/// # Examples
///
/// ```
/// use sc_status_parser::parse_descriptor;
///
/// let output = "\n\nD:(A;;CCLCSWRPWPDTLOCRRC;;;SY)\n";
/// assert_eq!(parse_descriptor(output), "D:(A;;CCLCSWRPWPDTLOCRRC;;;SY)");
/// ```
pub fn parse_descriptor(output: &str) -> String {
    static FIRST_LINE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s*(.*)\s*").expect("static regex must compile"));

    FIRST_LINE_RE
        .captures(output)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str().trim().to_string())
        .unwrap_or_else(|| output.to_string())
}

/// Assembles the service database lock status from a lock query.
///
/// # Examples
///
/// ```
/// use sc_status_parser::parse_lock;
///
/// let output = "\
/// QueryServiceLockstatus SUCCESS
///         IsLocked      : TRUE
///         LockOwner     : .\\NT Service Control Manager
///         LockDuration  : 1090 (seconds since acquired)
/// ";
/// let lock = parse_lock(output);
/// assert!(lock.locked);
/// assert_eq!(lock.owner, ".\\NT Service Control Manager");
/// assert_eq!(lock.duration, 1090);
/// ```
pub fn parse_lock(output: &str) -> LockInfo {
    LockInfo {
        locked: boolean_value(output, "IsLocked", false),
        owner: field_value(output, "LockOwner", ""),
        duration: numeric_value(output, "LockDuration", 0),
    }
}

/// Assembles the failure-recovery configuration from a failure query.
pub fn parse_failure_config(output: &str) -> FailureConfig {
    FailureConfig {
        reset_period: numeric_value(output, "RESET_PERIOD (in seconds)", 0),
        reboot_message: field_value(output, "REBOOT_MESSAGE", ""),
        command_line: field_value(output, "COMMAND_LINE", ""),
        failure_actions: field_value(output, "FAILURE_ACTIONS", ""),
    }
}

/// Assembles the static service configuration from a config query, using the
/// default [`HexPrefixPolicy`].
///
/// # Examples
///
/// ```
/// use sc_status_parser::parse_service_config;
///
/// let output = "\
/// [SC] QueryServiceConfig SUCCESS
///
/// SERVICE_NAME: wuauserv
///         TYPE               : 20  WIN32_SHARE_PROCESS
///         START_TYPE         : 3   DEMAND_START
///         ERROR_CONTROL      : 1   NORMAL
///         BINARY_PATH_NAME   : C:\\WINDOWS\\system32\\svchost.exe -k netsvcs
///         LOAD_ORDER_GROUP   :
///         TAG                : 0
///         DISPLAY_NAME       : Windows Update
///         DEPENDENCIES       : rpcss
///         SERVICE_START_NAME : LocalSystem
/// ";
/// let config = parse_service_config(output);
/// assert_eq!(config.service_type.code, 0x20);
/// assert_eq!(config.service_type.name, "WIN32_SHARE_PROCESS");
/// assert_eq!(config.dependencies, vec!["rpcss".to_string()]);
/// ```
pub fn parse_service_config(output: &str) -> ServiceConfig {
    parse_service_config_with_policy(output, HexPrefixPolicy::default())
}

/// [`parse_service_config`] with an explicit hex-prefix policy for the
/// `TYPE`/`START_TYPE`/`ERROR_CONTROL` codes.
pub fn parse_service_config_with_policy(output: &str, policy: HexPrefixPolicy) -> ServiceConfig {
    ServiceConfig {
        service_type: code_name_field(output, "TYPE", policy),
        start_type: code_name_field(output, "START_TYPE", policy),
        error_control: code_name_field(output, "ERROR_CONTROL", policy),
        bin_path: field_value(output, "BINARY_PATH_NAME", ""),
        load_order_group: field_value(output, "LOAD_ORDER_GROUP", ""),
        tag: numeric_value(output, "TAG", 0),
        display_name: field_value(output, "DISPLAY_NAME", ""),
        dependencies: array_value(output, "DEPENDENCIES"),
        service_start_name: field_value(output, "SERVICE_START_NAME", ""),
    }
}

/// Reads the code and label halves of a `<code>  <NAME>` field as one
/// consistent pair.
pub(crate) fn code_name_field(output: &str, name: &str, policy: HexPrefixPolicy) -> CodeName {
    CodeName {
        code: numeric_value_hex(output, name, policy, 0),
        name: code_name_value(output, name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_prefers_explicit_field() {
        let output = "[SC] OpenService FAILED 1060:\nERROR: The specified service does not exist.";
        assert_eq!(
            parse_error(output),
            "The specified service does not exist."
        );
    }

    #[test]
    fn test_error_strips_banner_line() {
        let output = "[SC] EnumQueryServicesStatus FAILED 5:\nAccess is denied.\n";
        assert_eq!(parse_error(output), "Access is denied.");
    }

    #[test]
    fn test_error_falls_through_to_whole_output() {
        assert_eq!(parse_error("something unexpected"), "something unexpected");
        assert_eq!(parse_error(""), "");
    }

    #[test]
    fn test_display_name_defaults_to_output() {
        assert_eq!(
            parse_display_name("[SC] GetServiceDisplayName SUCCESS  Name = Windows Update"),
            "Windows Update"
        );
        assert_eq!(parse_display_name("garbage"), "garbage");
    }

    #[test]
    fn test_lock_defaults_when_unlocked() {
        let output = "IsLocked : FALSE\nLockOwner :\nLockDuration :";
        let lock = parse_lock(output);
        // Presence coercion: a matched token reads as locked.
        assert!(lock.locked);
        assert_eq!(lock.owner, "");
        assert_eq!(lock.duration, 0);

        let empty = parse_lock("");
        assert!(!empty.locked);
        assert_eq!(empty.owner, "");
        assert_eq!(empty.duration, 0);
    }

    #[test]
    fn test_failure_config_fields() {
        let output = "\
[SC] QueryServiceConfig2 SUCCESS

SERVICE_NAME: spooler
        RESET_PERIOD (in seconds)    : 86400
        REBOOT_MESSAGE               : Spooler failed, rebooting
        COMMAND_LINE                 : C:\\recover.exe --spooler
        FAILURE_ACTIONS              : RESTART -- Delay = 60000 milliseconds.
";
        let failure = parse_failure_config(output);
        assert_eq!(failure.reset_period, 86400);
        assert_eq!(failure.reboot_message, "Spooler failed, rebooting");
        assert_eq!(failure.command_line, "C:\\recover.exe --spooler");
        assert_eq!(
            failure.failure_actions,
            "RESTART -- Delay = 60000 milliseconds."
        );
    }

    #[test]
    fn test_config_defaults_for_missing_fields() {
        let config = parse_service_config("SERVICE_NAME: bare");
        assert_eq!(config.tag, 0);
        assert!(config.dependencies.is_empty());
        assert_eq!(config.service_type, sc_status_core::CodeName::default());
        assert_eq!(config.bin_path, "");
    }

    #[test]
    fn test_config_multi_line_dependencies() {
        let output = "\
SERVICE_NAME: w32time
        TYPE               : 20  WIN32_SHARE_PROCESS
        DEPENDENCIES       : RpcSs
                           : EventLog
        SERVICE_START_NAME : NT AUTHORITY\\LocalService
";
        let config = parse_service_config(output);
        assert_eq!(config.dependencies, vec!["RpcSs", "EventLog"]);
        assert_eq!(config.service_start_name, "NT AUTHORITY\\LocalService");
    }
}
