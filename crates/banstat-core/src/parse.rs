//! Parsers for `fail2ban-client` text output.
//!
//! The control tool prints loosely structured, human-oriented text with
//! tree-drawing characters and tab-separated `label: value` pairs. These
//! functions locate labeled fields by scanning every line for the label —
//! never by fixed line index, which breaks as soon as the banner grows —
//! and map them onto the records in [`crate::model`].
//!
//! All parsers are pure: same input, same output, no I/O, no state.

use crate::model::{DaemonStatus, DaemonVersion, JailActionStats, JailFilterStats, JailStatus};

const JAIL_COUNT_LABEL: &str = "Number of jail:";
const JAIL_LIST_LABEL: &str = "Jail list:";

/// Errors raised when control-tool output cannot be mapped onto the model.
///
/// The offending raw text rides along for logging; the `Display` output is
/// safe to surface and never embeds it.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed status output: {reason}")]
    MalformedStatusOutput {
        reason: &'static str,
        raw: String,
    },

    #[error("malformed jail output: {reason}")]
    MalformedJailOutput {
        reason: String,
        raw: String,
    },
}

impl ParseError {
    /// The raw text that failed to parse, for log context.
    pub fn raw(&self) -> &str {
        match self {
            Self::MalformedStatusOutput { raw, .. } => raw,
            Self::MalformedJailOutput { raw, .. } => raw,
        }
    }
}

/// Parse the output of `fail2ban-client status` into a [`DaemonStatus`].
///
/// Both labeled lines (`Number of jail:` and `Jail list:`) must be present;
/// an empty list after the label yields an empty `jail_names`. No partial
/// result is produced on failure.
pub fn parse_daemon_status(raw: &str) -> Result<DaemonStatus, ParseError> {
    let mut jail_count = None;
    let mut jail_names = None;

    for line in raw.lines() {
        if jail_count.is_none()
            && let Some(value) = value_after_label(line, JAIL_COUNT_LABEL)
        {
            let count =
                value
                    .parse::<u32>()
                    .map_err(|_| ParseError::MalformedStatusOutput {
                        reason: "jail count is not an integer",
                        raw: raw.to_string(),
                    })?;
            jail_count = Some(count);
            continue;
        }
        if jail_names.is_none()
            && let Some(value) = value_after_label(line, JAIL_LIST_LABEL)
        {
            jail_names = Some(split_jail_list(value));
        }
    }

    let jail_count = jail_count.ok_or_else(|| ParseError::MalformedStatusOutput {
        reason: "missing \"Number of jail:\" line",
        raw: raw.to_string(),
    })?;
    let jail_names = jail_names.ok_or_else(|| ParseError::MalformedStatusOutput {
        reason: "missing \"Jail list:\" line",
        raw: raw.to_string(),
    })?;

    Ok(DaemonStatus {
        jail_count,
        jail_names,
    })
}

/// Parse the output of `fail2ban-client status <jail>` into a [`JailStatus`].
///
/// Scans every line once; the first matching label wins per line, and the
/// value is everything after the first colon, trimmed. Labels that never
/// appear keep their zero/empty defaults — fail2ban omits sections it has
/// nothing to say about, so leniency here is deliberate. Only a numeric
/// field that is present but unparseable is an error.
pub fn parse_jail_status(raw: &str, jail_name: &str) -> Result<JailStatus, ParseError> {
    let mut filter = JailFilterStats::default();
    let mut actions = JailActionStats::default();

    for line in raw.lines() {
        if line.contains("Currently failed:") {
            filter.currently_failed = numeric_value(line, raw)?;
        } else if line.contains("Total failed:") {
            filter.total_failed = numeric_value(line, raw)?;
        } else if line.contains("File list:") {
            filter.watched_files = text_value(line);
        } else if line.contains("Currently banned:") {
            actions.currently_banned = numeric_value(line, raw)?;
        } else if line.contains("Total banned:") {
            actions.total_banned = numeric_value(line, raw)?;
        } else if line.contains("Banned IP list:") {
            actions.banned_ips = text_value(line)
                .split_whitespace()
                .map(str::to_string)
                .collect();
        }
    }

    Ok(JailStatus {
        jail_name: jail_name.to_string(),
        filter,
        actions,
    })
}

/// Extract the daemon version from `fail2ban-client version` output.
///
/// Trims surrounding whitespace and returns the rest untouched. Empty
/// trimmed text is an unusual but valid version, not an error.
pub fn parse_version(raw: &str) -> DaemonVersion {
    DaemonVersion {
        version: raw.trim().to_string(),
    }
}

/// The trimmed text after `label`, if the line contains it anywhere.
fn value_after_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.find(label).map(|at| line[at + label.len()..].trim())
}

fn split_jail_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(|name| name.trim().to_string()).collect()
}

/// Everything after the first colon, trimmed. Values may themselves contain
/// colons (IPv6 addresses), so only the first one delimits.
fn text_value(line: &str) -> String {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

fn numeric_value(line: &str, raw: &str) -> Result<u64, ParseError> {
    let value = line
        .split_once(':')
        .map(|(_, value)| value.trim())
        .unwrap_or("");
    value
        .parse::<u64>()
        .map_err(|_| ParseError::MalformedJailOutput {
            reason: format!("expected an integer, got {value:?}"),
            raw: raw.to_string(),
        })
}
