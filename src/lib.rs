//! fsgate — sandboxed filesystem tool provider.
//!
//! Exposes a fixed set of filesystem tools over a request/response boundary
//! while confining every path argument to an allow-list of directories fixed
//! at startup.
//!
//! - [`allowlist`] — canonicalized roots plus path authorization
//! - [`registry`] — immutable tool definitions with JSON Schemas
//! - [`dispatch`] — name → handler routing, schema validation, error mapping
//! - [`fs`] — the filesystem tool handlers
//! - [`server`] — JSON-RPC 2.0 over stdio

pub mod allowlist;
pub mod dispatch;
pub mod error;
pub mod fs;
pub mod registry;
pub mod schema;
pub mod server;
