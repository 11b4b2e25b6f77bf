//! Template catalogue

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use tio_common::{EditorApi, Template, TemplateType, TioResult};

use crate::client::TenableIoClient;

#[derive(Deserialize)]
struct TemplateList {
    #[serde(default)]
    templates: Option<Vec<Template>>,
}

#[async_trait]
impl EditorApi for TenableIoClient {
    #[instrument(skip(self))]
    async fn list_templates(&self, kind: TemplateType) -> TioResult<Vec<Template>> {
        let list: TemplateList = self.get(&format!("editor/{kind}/templates")).await?;
        Ok(list.templates.unwrap_or_default())
    }
}
