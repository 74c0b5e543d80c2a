#![deny(unsafe_code)]

//! banstat core — fail2ban status over HTTP.
//!
//! Shells out to the fail2ban control tool (`fail2ban-client`), parses its
//! human-readable text output into typed records, and serves them as JSON
//! through an axum router. The parsers are pure functions; the invoker and
//! HTTP surface are thin plumbing around them.

use std::future::Future;
use std::pin::Pin;

/// A type-erased, `Send`-safe, boxed future — the standard return type for async
/// trait methods that require dynamic dispatch (`dyn Trait`).
///
/// Native `async fn` in traits produces opaque return types that are **not**
/// object-safe. Traits consumed via `Arc<dyn Trait>` must return a concrete
/// `Pin<Box<dyn Future>>` instead. This alias keeps those signatures readable.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Control-tool invoker: spawns `fail2ban-client` and captures its output.
pub mod client;
/// Immutable wire records returned by the API.
pub mod model;
/// Parsers mapping control-tool text output onto the data model.
pub mod parse;
/// axum router, handlers, and error-to-status mapping.
pub mod server;
/// Jail-name safety validation.
pub mod validate;

pub use client::{ClientError, ControlTool, Fail2banClient};
pub use model::{DaemonStatus, DaemonVersion, JailActionStats, JailFilterStats, JailStatus};
pub use parse::{ParseError, parse_daemon_status, parse_jail_status, parse_version};
pub use validate::is_valid_jail_name;
