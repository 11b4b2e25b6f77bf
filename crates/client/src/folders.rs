//! Folder resource

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tio_common::{Folder, FoldersApi, TioResult};

use crate::client::TenableIoClient;

#[derive(Deserialize)]
struct FolderList {
    #[serde(default)]
    folders: Option<Vec<Folder>>,
}

#[derive(Serialize)]
struct CreateFolder<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct Created {
    id: i64,
}

#[async_trait]
impl FoldersApi for TenableIoClient {
    #[instrument(skip(self))]
    async fn list_folders(&self) -> TioResult<Vec<Folder>> {
        let list: FolderList = self.get("folders").await?;
        Ok(list.folders.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn create_folder(&self, name: &str) -> TioResult<i64> {
        let created: Created = self
            .send_json(Method::POST, "folders", &CreateFolder { name })
            .await?;
        Ok(created.id)
    }

    #[instrument(skip(self))]
    async fn delete_folder(&self, id: i64) -> TioResult<()> {
        self.delete(&format!("folders/{id}")).await
    }
}
