use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use tio_common::{AgentGroup, TioResult};

use crate::client::TenableIoClient;

#[derive(Deserialize)]
struct GroupList {
    #[serde(default)]
    groups: Option<Vec<AgentGroup>>,
}

#[derive(Serialize)]
struct GroupName<'a> {
    name: &'a str,
}

pub struct AgentGroups<'a> {
    client: &'a TenableIoClient,
}

impl<'a> AgentGroups<'a> {
    pub(crate) fn new(client: &'a TenableIoClient) -> Self {
        Self { client }
    }

    fn path(scanner_id: i64) -> String {
        format!("scanners/{scanner_id}/agent-groups")
    }

    #[instrument(skip(self))]
    pub async fn list(&self, scanner_id: i64) -> TioResult<Vec<AgentGroup>> {
        let list: GroupList = self.client.get(&Self::path(scanner_id)).await?;
        Ok(list.groups.unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn create(&self, scanner_id: i64, name: &str) -> TioResult<AgentGroup> {
        self.client
            .send_json(Method::POST, &Self::path(scanner_id), &GroupName { name })
            .await
    }

    /// Rename a group.
    #[instrument(skip(self))]
    pub async fn configure(&self, scanner_id: i64, group_id: i64, name: &str) -> TioResult<()> {
        let path = format!("{}/{group_id}", Self::path(scanner_id));
        self.client
            .execute(Method::PUT, &path, Some(&GroupName { name }))
            .await
    }

    #[instrument(skip(self))]
    pub async fn details(&self, scanner_id: i64, group_id: i64) -> TioResult<AgentGroup> {
        self.client
            .get(&format!("{}/{group_id}", Self::path(scanner_id)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, scanner_id: i64, group_id: i64) -> TioResult<()> {
        self.client
            .delete(&format!("{}/{group_id}", Self::path(scanner_id)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn add_agent(&self, scanner_id: i64, group_id: i64, agent_id: i64) -> TioResult<()> {
        let path = format!("{}/{group_id}/agents/{agent_id}", Self::path(scanner_id));
        self.client.execute::<()>(Method::PUT, &path, None).await
    }

    #[instrument(skip(self))]
    pub async fn remove_agent(&self, scanner_id: i64, group_id: i64, agent_id: i64) -> TioResult<()> {
        let path = format!("{}/{group_id}/agents/{agent_id}", Self::path(scanner_id));
        self.client.delete(&path).await
    }
}
