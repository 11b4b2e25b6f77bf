//! Agent and agent group records

use serde::{Deserialize, Serialize};

use crate::types::null_as_default;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub distro: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub core_version: Option<String>,
    #[serde(default)]
    pub linked_on: Option<i64>,
    #[serde(default)]
    pub last_connect: Option<i64>,
    #[serde(default)]
    pub last_scanned: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub shared: Option<i64>,
    #[serde(default)]
    pub creation_date: Option<i64>,
    #[serde(default)]
    pub last_modification_date: Option<i64>,
    #[serde(default)]
    pub agents_count: Option<i64>,
    /// Only populated by the details endpoint.
    #[serde(default, deserialize_with = "null_as_default")]
    pub agents: Vec<Agent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn group_without_agents() {
        let group: AgentGroup =
            serde_json::from_value(json!({"id": 5, "name": "linux", "agents": null})).unwrap();
        assert_eq!(group.id, 5);
        assert!(group.agents.is_empty());
    }
}
