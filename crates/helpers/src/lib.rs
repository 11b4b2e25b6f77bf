//! Tio Helpers - multi-call Tenable.io workflows
//!
//! Everything here is generic over the service traits in `tio-common`, so
//! it runs against the HTTP client or any other implementation:
//! - [`TemplateResolver`] finds a scan template by exact name or title
//! - [`ScanHelper`] creates, finds and bulk-stops scans
//! - [`ScanRef`] / [`FolderRef`] are borrowed handles to one remote resource
//! - [`SessionHelper`] checks that the client is authenticated

mod folder_ref;
mod progress;
mod scan_helper;
mod scan_ref;
mod session;
mod templates;
mod wait;

#[cfg(test)]
mod testing;

pub use folder_ref::{FolderHelper, FolderRef};
pub use progress::StopAllReport;
pub use scan_helper::ScanHelper;
pub use scan_ref::ScanRef;
pub use session::SessionHelper;
pub use templates::{TemplateQuery, TemplateResolver};
pub use wait::{WaitPolicy, DEFAULT_POLL_INTERVAL};
