//! Service listing parser.
//!
//! A listing is split on blank-line boundaries into per-service blocks, then
//! interpreted by one of two independent strategies producing the same record
//! shape:
//!
//! - **Labeled** — anchors on the canonical English field labels
//!   (`SERVICE_NAME`, `STATE`, ...). Used whenever at least one block carries
//!   a `SERVICE_NAME` label.
//! - **Positional** — locale fallback for non-English output. Field labels
//!   are translated by the OS, but the enumeration value tokens
//!   (`WIN32_SHARE_PROCESS`, `RUNNING`, ...) and the `[SC]` banner tag are
//!   not, so blocks are read positionally and lines are classified by which
//!   known value token they contain.
//!
//! The selector is a thin function over the two: labeled first, positional
//! only when labeled recognizes nothing.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::fields::{
    HexPrefixPolicy, code_name_value, field_capture, field_value, flag_list, hex_value,
    numeric_value, numeric_value_hex, parse_int_prefix,
};
use crate::records::code_name_field;
use sc_status_core::{
    CodeName, SERVICE_STATE_TOKENS, SERVICE_TYPE_TOKENS, ServiceRecord, ServiceState,
};

static BLOCK_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").expect("static regex must compile"));

/// Parses the full output of a listing query into service records, in the
/// tool's listing order, using the default [`HexPrefixPolicy`].
///
/// Never fails: malformed or unrecognized input yields an empty vector, and
/// absent fields within a recognized block degrade to defaults.
///
/// # Examples
///
/// ```
/// use sc_status_parser::parse_service_list;
///
/// let output = "\
/// SERVICE_NAME: wuauserv
/// DISPLAY_NAME: Windows Update
///         TYPE               : 20  WIN32_SHARE_PROCESS
///         STATE              : 4  RUNNING
///                                 (STOPPABLE, NOT_PAUSABLE, ACCEPTS_SHUTDOWN)
///         WIN32_EXIT_CODE    : 0  (0x0)
///         SERVICE_EXIT_CODE  : 0  (0x0)
///         CHECKPOINT         : 0x0
///         WAIT_HINT          : 0x0
/// ";
/// let services = parse_service_list(output);
/// assert_eq!(services.len(), 1);
/// assert_eq!(services[0].name, "wuauserv");
/// assert!(services[0].state.running);
/// ```
pub fn parse_service_list(output: &str) -> Vec<ServiceRecord> {
    parse_service_list_with_policy(output, HexPrefixPolicy::default())
}

/// [`parse_service_list`] with an explicit hex-prefix policy for the
/// `TYPE` and `STATE` codes.
pub fn parse_service_list_with_policy(
    output: &str,
    policy: HexPrefixPolicy,
) -> Vec<ServiceRecord> {
    let blocks: Vec<&str> = BLOCK_SPLIT_RE.split(output).collect();

    let labeled = labeled_records(&blocks, policy);
    if !labeled.is_empty() {
        debug!(services = labeled.len(), "parsed listing with labeled strategy");
        return labeled;
    }

    let positional = positional_records(&blocks);
    debug!(
        services = positional.len(),
        "labeled strategy found no SERVICE_NAME blocks, used positional fallback"
    );
    positional
}

/// Labeled strategy: one record per block carrying a `SERVICE_NAME` label.
fn labeled_records(blocks: &[&str], policy: HexPrefixPolicy) -> Vec<ServiceRecord> {
    blocks
        .iter()
        .filter(|block| block.contains("SERVICE_NAME"))
        .map(|block| labeled_record(block, policy))
        .collect()
}

fn labeled_record(block: &str, policy: HexPrefixPolicy) -> ServiceRecord {
    let state_code = numeric_value_hex(block, "STATE", policy, 0);

    let accepted = flag_list(block, "STATE")
        .filter(|list| !list.is_empty())
        .map(|list| {
            list.split([',', ' '])
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        });
    let pid = field_capture(block, "PID")
        .as_deref()
        .and_then(parse_int_prefix);
    let flags = field_capture(block, "FLAGS").filter(|value| !value.is_empty());

    ServiceRecord {
        name: field_value(block, "SERVICE_NAME", ""),
        display_name: field_value(block, "DISPLAY_NAME", ""),
        service_type: code_name_field(block, "TYPE", policy),
        state: ServiceState::from_code(state_code, code_name_value(block, "STATE", "")),
        win32_exit_code: numeric_value(block, "WIN32_EXIT_CODE", 0),
        service_exit_code: numeric_value(block, "SERVICE_EXIT_CODE", 0),
        checkpoint: hex_value(block, "CHECKPOINT", 0),
        wait_hint: hex_value(block, "WAIT_HINT", 0),
        accepted,
        pid,
        flags,
    }
}

/// Positional fallback: one record per block that yields a non-empty name.
fn positional_records(blocks: &[&str]) -> Vec<ServiceRecord> {
    blocks.iter().filter_map(|block| positional_record(block)).collect()
}

fn positional_record(block: &str) -> Option<ServiceRecord> {
    let mut record = ServiceRecord::default();
    let mut found_name = false;

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || line.starts_with("[SC]") {
            continue;
        }

        // Only the segments up to the second colon matter: the label and the
        // value that immediately follows it.
        let mut segments = trimmed.split(':');
        let label = segments.next().unwrap_or("").trim();
        let value = segments.next().map(str::trim);

        if !found_name {
            record.name = value.unwrap_or("").to_string();
            found_name = true;
        }

        if let Some(value) = value {
            // The tool prints PID last, right before diagnostic trailer lines
            // that must not be scanned.
            if label.eq_ignore_ascii_case("PID") {
                record.pid = parse_int_prefix(value);
                break;
            }
            if let Some(pair) = match_vocabulary(value, &SERVICE_TYPE_TOKENS) {
                record.service_type = pair;
            }
            if let Some(pair) = match_vocabulary(value, &SERVICE_STATE_TOKENS) {
                record.state = ServiceState::from_code(pair.code, pair.name);
            }
        }
    }

    if record.name.is_empty() { None } else { Some(record) }
}

/// Splits a value like `4  RUNNING` into its leading numeric code and the
/// first vocabulary token it contains. Locale-independent: only the value
/// tokens are fixed across display languages.
fn match_vocabulary(value: &str, tokens: &[&str]) -> Option<CodeName> {
    let token = tokens.iter().find(|token| value.contains(**token))?;
    let code = value
        .split_whitespace()
        .next()
        .and_then(parse_int_prefix)
        .unwrap_or(0);
    Some(CodeName::new(code, *token))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH_LISTING: &str = "\
SERVICE_NAME: Dhcp
DISPLAY_NAME: DHCP Client
        TYPE               : 20  WIN32_SHARE_PROCESS
        STATE              : 4  RUNNING
                                (STOPPABLE, NOT_PAUSABLE, ACCEPTS_SHUTDOWN)
        WIN32_EXIT_CODE    : 0  (0x0)
        SERVICE_EXIT_CODE  : 0  (0x0)
        CHECKPOINT         : 0x0
        WAIT_HINT          : 0x0

SERVICE_NAME: Spooler
DISPLAY_NAME: Print Spooler
        TYPE               : 110  WIN32_OWN_PROCESS (interactive)
        STATE              : 1  STOPPED
        WIN32_EXIT_CODE    : 1077  (0x435)
        SERVICE_EXIT_CODE  : 0  (0x0)
        CHECKPOINT         : 0x0
        WAIT_HINT          : 0x0
";

    #[test]
    fn test_labeled_listing_order_and_names() {
        let services = parse_service_list(ENGLISH_LISTING);
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name, "Dhcp");
        assert_eq!(services[1].name, "Spooler");
    }

    #[test]
    fn test_labeled_state_derivation() {
        let services = parse_service_list(ENGLISH_LISTING);
        assert_eq!(services[0].state.code, 4);
        assert!(services[0].state.running);
        assert!(!services[0].state.paused && !services[0].state.stopped);
        assert!(services[1].state.stopped);
        assert_eq!(services[1].win32_exit_code, 1077);
    }

    #[test]
    fn test_labeled_hex_reinterpretation_of_type() {
        let services = parse_service_list(ENGLISH_LISTING);
        assert_eq!(services[0].service_type.code, 0x20);
        assert_eq!(services[0].service_type.name, "WIN32_SHARE_PROCESS");
        assert_eq!(services[1].service_type.code, 0x110);
    }

    #[test]
    fn test_labeled_optional_fields() {
        let services = parse_service_list(ENGLISH_LISTING);
        assert_eq!(
            services[0].accepted.as_deref(),
            Some(&["STOPPABLE".to_string(), "NOT_PAUSABLE".into(), "ACCEPTS_SHUTDOWN".into()][..])
        );
        assert_eq!(services[1].accepted, None);
        assert_eq!(services[0].pid, None);
        assert_eq!(services[0].flags, None);
    }

    #[test]
    fn test_extended_listing_attaches_pid_and_flags() {
        let output = "\
SERVICE_NAME: wuauserv
DISPLAY_NAME: Windows Update
        TYPE               : 20  WIN32_SHARE_PROCESS
        STATE              : 4  RUNNING
                                (STOPPABLE, NOT_PAUSABLE, ACCEPTS_SHUTDOWN)
        WIN32_EXIT_CODE    : 0  (0x0)
        SERVICE_EXIT_CODE  : 0  (0x0)
        CHECKPOINT         : 0x0
        WAIT_HINT          : 0x0
        PID                : 1044
        FLAGS              : RUNS_IN_SYSTEM_PROCESS
";
        let services = parse_service_list(output);
        assert_eq!(services[0].pid, Some(1044));
        assert_eq!(
            services[0].flags.as_deref(),
            Some("RUNS_IN_SYSTEM_PROCESS")
        );
    }

    #[test]
    fn test_empty_flags_value_not_attached() {
        let output = "SERVICE_NAME: x\n        FLAGS              :\n";
        let services = parse_service_list(output);
        assert_eq!(services[0].flags, None);
    }

    #[test]
    fn test_empty_input_is_empty_listing() {
        assert!(parse_service_list("").is_empty());
        assert!(parse_service_list("\r\n\r\n").is_empty());
    }

    #[test]
    fn test_crlf_block_boundaries() {
        let output = "SERVICE_NAME: a\r\n        STATE : 4  RUNNING\r\n\r\nSERVICE_NAME: b\r\n        STATE : 1  STOPPED\r\n";
        let services = parse_service_list(output);
        assert_eq!(services.len(), 2);
        assert!(services[0].state.running);
        assert!(services[1].state.stopped);
    }

    // German-localized labels: only the value tokens stay fixed.
    const LOCALIZED_LISTING: &str = "\
SERVICENAME: Spooler
ANZEIGENAME: Druckwarteschlange
        ART                : 110  WIN32_OWN_PROCESS (interactive)
        STATUS             : 4  RUNNING
                                (STOPPABLE, NOT_PAUSABLE, ACCEPTS_SHUTDOWN)
        WIN32_EXITCODE     : 0  (0x0)
        DIENST_EXITCODE    : 0  (0x0)
        PID                : 2288
        FLAGS              :

SERVICENAME: Dhcp
ANZEIGENAME: DHCP-Client
        ART                : 20  WIN32_SHARE_PROCESS
        STATUS             : 1  STOPPED
        PID                : 0
        FLAGS              :
";

    #[test]
    fn test_positional_fallback_for_localized_labels() {
        let services = parse_service_list(LOCALIZED_LISTING);
        assert_eq!(services.len(), 2);

        assert_eq!(services[0].name, "Spooler");
        assert_eq!(services[0].service_type.code, 110);
        assert_eq!(services[0].service_type.name, "WIN32_OWN_PROCESS");
        assert_eq!(services[0].state.code, 4);
        assert_eq!(services[0].state.name, "RUNNING");
        assert!(services[0].state.running);
        assert_eq!(services[0].pid, Some(2288));

        assert_eq!(services[1].name, "Dhcp");
        assert!(services[1].state.stopped);
        assert_eq!(services[1].pid, Some(0));
    }

    #[test]
    fn test_positional_pid_terminates_block_scan() {
        // Trailer lines after PID must not override earlier matches.
        let output = "\
NOM_DE_SERVICE: WSearch
        TYPE : 10  WIN32_OWN_PROCESS
        ETAT : 4  RUNNING
        PID  : 3120
        REMARQUE : 1  STOPPED
";
        let services = parse_service_list(output);
        assert_eq!(services.len(), 1);
        assert!(services[0].state.running);
        assert_eq!(services[0].pid, Some(3120));
    }

    #[test]
    fn test_positional_skips_banner_and_nameless_blocks() {
        let output = "\
[SC] EnumQueryServicesStatus: OpenSCManager SUCCESS

NOM_DE_SERVICE: Dhcp
        ETAT : 4  RUNNING

une ligne sans deux-points
";
        let services = parse_service_list(output);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "Dhcp");
    }
}
