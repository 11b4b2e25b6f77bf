use serde::Deserialize;
use tracing::instrument;

use tio_common::{Scanner, TioResult};

use crate::client::TenableIoClient;

#[derive(Deserialize)]
struct ScannerList {
    #[serde(default)]
    scanners: Option<Vec<Scanner>>,
}

pub struct Scanners<'a> {
    client: &'a TenableIoClient,
}

impl<'a> Scanners<'a> {
    pub(crate) fn new(client: &'a TenableIoClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> TioResult<Vec<Scanner>> {
        let list: ScannerList = self.client.get("scanners").await?;
        Ok(list.scanners.unwrap_or_default())
    }
}
