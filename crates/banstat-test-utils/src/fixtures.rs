//! Canned `fail2ban-client` output, shaped like the real tool prints it:
//! tree-drawing prefixes, tab-separated `label: value` pairs.

/// `fail2ban-client status` with three configured jails.
pub const DAEMON_STATUS: &str = "Status\n\
    |- Number of jail:\t3\n\
    `- Jail list:\tsshd, apache, nginx\n";

/// `fail2ban-client status sshd` with both filter and action sections.
pub const JAIL_STATUS_SSHD: &str = "Status for the jail: sshd\n\
    |- Filter\n\
    |  |- Currently failed:\t2\n\
    |  |- Total failed:\t10\n\
    |  `- File list:\t/var/log/auth.log\n\
    `- Actions\n\
    \x20  |- Currently banned:\t1\n\
    \x20  |- Total banned:\t5\n\
    \x20  `- Banned IP list:\t10.0.0.1 10.0.0.2\n";

/// `fail2ban-client version`, including the trailing newline the tool emits.
pub const VERSION: &str = "1.1.0\n";
