#![deny(unsafe_code)]

//! Shared test utilities for the banstat workspace.
//!
//! Provides canned control-tool output, a stub invoker, and config
//! builders so that individual crate tests stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! banstat-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod fixtures;
pub mod stub;
