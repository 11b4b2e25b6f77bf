//! Thin wrappers over the resources the workflow helpers do not drive.
//!
//! Each wrapper borrows the client and maps one method to one endpoint.

mod agent_groups;
mod agents;
mod scanners;
mod tags;

pub use agent_groups::AgentGroups;
pub use agents::Agents;
pub use scanners::Scanners;
pub use tags::Tags;
