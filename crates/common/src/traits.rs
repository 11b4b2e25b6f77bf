//! Service traits the workflow helpers are written against
//!
//! The HTTP client in `tio-client` implements all of them; tests plug in
//! in-memory doubles. Method names are prefixed by resource so a single
//! type can implement every trait without call-site ambiguity.

use async_trait::async_trait;

use crate::error::TioResult;
use crate::types::{
    Folder, ScanCreated, ScanDetails, ScanList, ScanSettings, ScanStatus, Session, Template,
    TemplateType,
};

/// Template catalogue (the "editor" resource).
#[async_trait]
pub trait EditorApi: Send + Sync {
    /// All templates of the given family, in service order.
    async fn list_templates(&self, kind: TemplateType) -> TioResult<Vec<Template>>;
}

/// Scan resource operations.
#[async_trait]
pub trait ScansApi: Send + Sync {
    async fn create_scan(&self, template_uuid: &str, settings: &ScanSettings)
        -> TioResult<ScanCreated>;

    async fn scan_details(&self, id: i64) -> TioResult<ScanDetails>;

    /// List scans, optionally restricted to one folder.
    async fn list_scans(&self, folder_id: Option<i64>) -> TioResult<ScanList>;

    /// Launch a scan; returns the run uuid.
    async fn launch_scan(&self, id: i64, alt_targets: Option<&[String]>) -> TioResult<String>;

    async fn stop_scan(&self, id: i64, force: bool) -> TioResult<()>;

    async fn pause_scan(&self, id: i64) -> TioResult<()>;

    async fn resume_scan(&self, id: i64) -> TioResult<()>;

    async fn delete_scan(&self, id: i64) -> TioResult<()>;

    /// Current status as reported by the details record.
    async fn scan_status(&self, id: i64) -> TioResult<ScanStatus> {
        Ok(self.scan_details(id).await?.info.status)
    }
}

/// Folder resource operations.
#[async_trait]
pub trait FoldersApi: Send + Sync {
    async fn list_folders(&self) -> TioResult<Vec<Folder>>;

    /// Create a folder; returns its id.
    async fn create_folder(&self, name: &str) -> TioResult<i64>;

    async fn delete_folder(&self, id: i64) -> TioResult<()>;
}

/// Session resource.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// The caller's session, or `None` when there is no authenticated one.
    async fn active_session(&self) -> TioResult<Option<Session>>;
}

/// Everything the workflow helpers need from a remote client.
pub trait TenableIo: EditorApi + ScansApi + FoldersApi + SessionApi {}

impl<T> TenableIo for T where T: EditorApi + ScansApi + FoldersApi + SessionApi + ?Sized {}
