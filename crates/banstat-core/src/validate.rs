//! Jail-name safety validation.
//!
//! A jail name taken from a request path is later interpolated into a
//! `fail2ban-client` argument list. This check is the security boundary:
//! it must run before any command line is constructed, and the invoked
//! tool is never trusted to reject bad input on our behalf.

/// Returns true iff `name` is non-empty and every character is an ASCII
/// letter, digit, underscore, or hyphen.
///
/// Whitespace, path separators, and shell metacharacters all fail the
/// check. Never panics.
pub fn is_valid_jail_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
