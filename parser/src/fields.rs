//! Field extraction primitives over raw tool output.
//!
//! Every typed accessor in this crate bottoms out in [`field_capture`], which
//! scans for `<field name><spaces>[=|:]<value>` and returns the trimmed first
//! capture. Field names are escaped with [`regex::escape`] so names like
//! `RESET_PERIOD (in seconds)` match literally. Absence is always
//! representable as the caller's default; nothing in this module fails.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// How forced-hex numeric fields acquire their `0x` prefix.
///
/// The tool prints some numeric fields (service type, start type, error
/// control, state) in hexadecimal without a radix prefix, so the accessor
/// prefixes the raw value with `0x` before parsing. Under [`Always`] a value
/// that already carries `0x` ends up as `0x0x...` and parses to 0;
/// [`IfMissing`] prefixes only when the value has none. The tool itself
/// never prints the prefix on these fields, so the two policies only diverge
/// on inputs from other sources.
///
/// [`Always`]: HexPrefixPolicy::Always
/// [`IfMissing`]: HexPrefixPolicy::IfMissing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexPrefixPolicy {
    /// Always prepend `0x`, even when the value already starts with it.
    #[default]
    Always,
    /// Prepend `0x` only when the value does not already start with it.
    IfMissing,
}

fn name_value_regex(name: &str, value_pattern: &str, case_insensitive: bool) -> Regex {
    let pattern = format!(r"{}\s*[=:]{}", regex::escape(name), value_pattern);
    RegexBuilder::new(&pattern)
        .case_insensitive(case_insensitive)
        .build()
        .expect("escaped field pattern must compile")
}

fn first_capture(text: &str, regex: &Regex) -> Option<String> {
    regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str().trim().to_string())
}

/// Finds `name` followed by `=` or `:` and returns the trimmed remainder of
/// the line, or `None` when the field is absent.
pub(crate) fn field_capture(text: &str, name: &str) -> Option<String> {
    first_capture(text, &name_value_regex(name, "(.*)", false))
}

/// [`field_capture`] with a caller-supplied default for absent fields.
pub(crate) fn field_value(text: &str, name: &str, default: &str) -> String {
    field_capture(text, name).unwrap_or_else(|| default.to_string())
}

/// Extracts the label half of a `<code>  <NAME>` field value, skipping an
/// optional leading numeric token.
pub(crate) fn code_name_value(text: &str, name: &str, default: &str) -> String {
    first_capture(text, &name_value_regex(name, r"\s*\d*\s*(.*)", false))
        .unwrap_or_else(|| default.to_string())
}

/// Extracts the parenthesized token list that follows a field's value, e.g.
/// the accepted-controls list after a `STATE` line. The parenthetical may sit
/// on a continuation line below the field itself.
pub(crate) fn flag_list(text: &str, name: &str) -> Option<String> {
    let pattern = format!(r"{}\s*:\s.*\s*\((.*)\)", regex::escape(name));
    let regex = Regex::new(&pattern).expect("escaped field pattern must compile");
    first_capture(text, &regex)
}

/// Extracts a multi-line array field: `name` introduces zero or more
/// colon-prefixed continuation lines, one value per line. Returns an empty
/// vector when the field is absent.
pub(crate) fn array_value(text: &str, name: &str) -> Vec<String> {
    static ENTRY_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s*:\s*(.*)").expect("static regex must compile"));

    let pattern = format!(r"{}((?:\s*:.*)*)", regex::escape(name));
    let regex = Regex::new(&pattern).expect("escaped field pattern must compile");
    let Some(region) = regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str().to_string())
    else {
        return Vec::new();
    };

    ENTRY_RE
        .captures_iter(&region)
        .filter_map(|captures| captures.get(1))
        .map(|group| group.as_str().trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Extracts a decimal numeric field. Unparseable or absent values yield
/// `default`.
pub(crate) fn numeric_value(text: &str, name: &str, default: i64) -> i64 {
    raw_numeric(text, name)
        .as_deref()
        .and_then(parse_int_prefix)
        .unwrap_or(default)
}

/// Extracts a numeric field the tool prints in hexadecimal without a radix
/// prefix, forcing a `0x` prefix per `policy` before parsing.
pub(crate) fn numeric_value_hex(
    text: &str,
    name: &str,
    policy: HexPrefixPolicy,
    default: i64,
) -> i64 {
    let Some(raw) = raw_numeric(text, name) else {
        return default;
    };
    let prefixed = match policy {
        HexPrefixPolicy::Always => format!("0x{raw}"),
        HexPrefixPolicy::IfMissing if !raw.starts_with("0x") => format!("0x{raw}"),
        HexPrefixPolicy::IfMissing => raw,
    };
    parse_int_prefix(&prefixed).unwrap_or(default)
}

fn raw_numeric(text: &str, name: &str) -> Option<String> {
    first_capture(text, &name_value_regex(name, r"\s*((?:0x)?\d*)", false))
}

/// Extracts a field whose printed value carries its own radix (the tool
/// renders checkpoint and wait-hint as `0x0`, `0x7d0`, ...).
pub(crate) fn hex_value(text: &str, name: &str, default: i64) -> i64 {
    field_capture(text, name)
        .as_deref()
        .and_then(parse_int_prefix)
        .unwrap_or(default)
}

/// Extracts a `true`/`false` token case-insensitively. Presence of a match
/// coerces to `true` regardless of the token's spelling; absence yields
/// `default`.
pub(crate) fn boolean_value(text: &str, name: &str, default: bool) -> bool {
    first_capture(text, &name_value_regex(name, r"\s*(true|false)", true))
        .map(|token| !token.is_empty())
        .unwrap_or(default)
}

/// Leading-digits integer parse in the style of JavaScript's `parseInt`: an
/// optional `0x`/`0X` prefix selects radix 16, then the longest run of valid
/// digits is taken and any trailing garbage ignored. An empty digit run is
/// `None`.
pub(crate) fn parse_int_prefix(value: &str) -> Option<i64> {
    let value = value.trim();
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(rest) => (rest, 16),
        None => (value, 10),
    };
    let end = digits
        .find(|ch: char| !ch.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    i64::from_str_radix(&digits[..end], radix).ok()
}
