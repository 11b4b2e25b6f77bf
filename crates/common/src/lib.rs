//! Tio Common - Shared types and traits for the Tenable.io SDK
//!
//! This crate provides the error type, the request/response model and the
//! service traits used across the SDK:
//! - `TenableIoError` / `TioResult` for every fallible operation
//! - serde models for scans, templates, folders, sessions, agents and tags
//! - async traits the workflow helpers are generic over

pub mod agents;
pub mod error;
pub mod tags;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use agents::{Agent, AgentGroup};
pub use error::{TenableIoError, TioResult};
pub use tags::{
    AssetAssignment, AssetAssignmentUpdate, AssignmentAction, AssignmentCount, AssignmentCounts,
    Pagination, TagCategory, TagCategoryList, TagValue, TagValueList, TagValueRequest,
};
pub use traits::{EditorApi, FoldersApi, ScansApi, SessionApi, TenableIo};
pub use types::{
    Folder, Scan, ScanCreateRequest, ScanCreated, ScanDetails, ScanDetailsInfo, ScanHistory,
    ScanHost, ScanList, ScanSettings, ScanStatus, ScanVulnerability, Scanner, Session, Template,
    TemplateType,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
