//! Scan resource

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tio_common::{
    ScanCreateRequest, ScanCreated, ScanDetails, ScanList, ScanSettings, ScansApi, TioResult,
};

use crate::client::TenableIoClient;

#[derive(Deserialize)]
struct CreateResponse {
    scan: ScanCreated,
}

#[derive(Serialize)]
struct LaunchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    alt_targets: Option<&'a [String]>,
}

#[derive(Deserialize)]
struct LaunchResponse {
    scan_uuid: String,
}

#[derive(Serialize)]
struct FolderQuery {
    folder_id: i64,
}

#[async_trait]
impl ScansApi for TenableIoClient {
    #[instrument(skip(self, settings), fields(name = %settings.name))]
    async fn create_scan(&self, template_uuid: &str, settings: &ScanSettings) -> TioResult<ScanCreated> {
        let body = ScanCreateRequest {
            uuid: template_uuid,
            settings,
        };
        let created: CreateResponse = self.send_json(Method::POST, "scans", &body).await?;
        Ok(created.scan)
    }

    #[instrument(skip(self))]
    async fn scan_details(&self, id: i64) -> TioResult<ScanDetails> {
        self.get(&format!("scans/{id}")).await
    }

    #[instrument(skip(self))]
    async fn list_scans(&self, folder_id: Option<i64>) -> TioResult<ScanList> {
        match folder_id {
            Some(folder_id) => self.get_with_query("scans", &FolderQuery { folder_id }).await,
            None => self.get("scans").await,
        }
    }

    #[instrument(skip(self, alt_targets))]
    async fn launch_scan(&self, id: i64, alt_targets: Option<&[String]>) -> TioResult<String> {
        let body = LaunchRequest { alt_targets };
        let launched: LaunchResponse = self
            .send_json(Method::POST, &format!("scans/{id}/launch"), &body)
            .await?;
        Ok(launched.scan_uuid)
    }

    #[instrument(skip(self))]
    async fn stop_scan(&self, id: i64, force: bool) -> TioResult<()> {
        let action = if force { "force-stop" } else { "stop" };
        self.execute::<()>(Method::POST, &format!("scans/{id}/{action}"), None)
            .await
    }

    #[instrument(skip(self))]
    async fn pause_scan(&self, id: i64) -> TioResult<()> {
        self.execute::<()>(Method::POST, &format!("scans/{id}/pause"), None)
            .await
    }

    #[instrument(skip(self))]
    async fn resume_scan(&self, id: i64) -> TioResult<()> {
        self.execute::<()>(Method::POST, &format!("scans/{id}/resume"), None)
            .await
    }

    #[instrument(skip(self))]
    async fn delete_scan(&self, id: i64) -> TioResult<()> {
        self.delete(&format!("scans/{id}")).await
    }
}
