use serde::Deserialize;
use tracing::instrument;

use tio_common::{Agent, TioResult};

use crate::client::TenableIoClient;

#[derive(Deserialize)]
struct AgentList {
    #[serde(default)]
    agents: Option<Vec<Agent>>,
}

/// Agents linked to a scanner.
pub struct Agents<'a> {
    client: &'a TenableIoClient,
}

impl<'a> Agents<'a> {
    pub(crate) fn new(client: &'a TenableIoClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, scanner_id: i64) -> TioResult<Vec<Agent>> {
        let list: AgentList = self
            .client
            .get(&format!("scanners/{scanner_id}/agents"))
            .await?;
        Ok(list.agents.unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn details(&self, scanner_id: i64, agent_id: i64) -> TioResult<Agent> {
        self.client
            .get(&format!("scanners/{scanner_id}/agents/{agent_id}"))
            .await
    }

    /// Unlink an agent.
    #[instrument(skip(self))]
    pub async fn delete(&self, scanner_id: i64, agent_id: i64) -> TioResult<()> {
        self.client
            .delete(&format!("scanners/{scanner_id}/agents/{agent_id}"))
            .await
    }
}
