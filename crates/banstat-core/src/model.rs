//! Wire records for the banstat API.
//!
//! These types are serialized as JSON response bodies. Every record is
//! constructed fresh by the parsers for each request and never mutated
//! afterwards; nothing here outlives a request/response cycle.

use serde::{Deserialize, Serialize};

/// Overall daemon status: how many jails are configured and their names.
///
/// `jail_count` is reported by the daemon independently of the jail list
/// and is deliberately not cross-checked against `jail_names.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonStatus {
    pub jail_count: u32,
    /// Jail names in the order the daemon reported them.
    pub jail_names: Vec<String>,
}

/// Filter-side statistics for a single jail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JailFilterStats {
    pub currently_failed: u64,
    pub total_failed: u64,
    /// Raw monitored-file list text, unparsed.
    pub watched_files: String,
}

/// Action-side statistics for a single jail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JailActionStats {
    pub currently_banned: u64,
    pub total_banned: u64,
    /// Banned addresses in reported order. Duplicates are preserved as-is.
    pub banned_ips: Vec<String>,
}

/// Detailed status of one named jail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JailStatus {
    /// The jail name, validated before any command was run.
    pub jail_name: String,
    pub filter: JailFilterStats,
    pub actions: JailActionStats,
}

/// Daemon version string, trimmed but otherwise untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonVersion {
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn daemon_status_json_shape() {
        let status = DaemonStatus {
            jail_count: 2,
            jail_names: vec!["sshd".to_string(), "nginx".to_string()],
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"jail_count": 2, "jail_names": ["sshd", "nginx"]})
        );
    }

    #[test]
    fn jail_status_json_shape() {
        let status = JailStatus {
            jail_name: "sshd".to_string(),
            filter: JailFilterStats {
                currently_failed: 2,
                total_failed: 10,
                watched_files: "/var/log/auth.log".to_string(),
            },
            actions: JailActionStats {
                currently_banned: 1,
                total_banned: 5,
                banned_ips: vec!["10.0.0.1".to_string()],
            },
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["jail_name"], "sshd");
        assert_eq!(json["filter"]["total_failed"], 10);
        assert_eq!(json["actions"]["banned_ips"][0], "10.0.0.1");
    }
}
