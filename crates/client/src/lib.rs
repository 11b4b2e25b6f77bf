//! Tio Client - async HTTP client for the Tenable.io REST API
//!
//! `TenableIoClient` implements the service traits from `tio-common`
//! (editor, scans, folders, session) so the workflow helpers can drive it,
//! and exposes thin wrappers for scanners, agents, agent groups and tags.
//!
//! Requests carry the `X-ApiKeys` header built from [`ClientConfig`];
//! non-success responses are mapped onto `TenableIoError` kinds
//! (401/403 not authorized, 404 not found, anything else an API error).

mod client;
mod config;
mod editor;
mod folders;
mod rate_limiter;
mod resources;
mod scans;
mod session;

pub use client::TenableIoClient;
pub use config::{
    ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, ENV_ACCESS_KEY, ENV_ENDPOINT,
    ENV_SECRET_KEY, ENV_TIMEOUT_SECS,
};
pub use rate_limiter::RateLimiter;
pub use resources::{AgentGroups, Agents, Scanners, Tags};
