//! Tag categories, tag values and asset assignments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::null_as_default;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCategory {
    #[serde(default, skip_serializing)]
    pub uuid: Option<Uuid>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing)]
    pub reserved: Option<bool>,
}

impl TagCategory {
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagValue {
    pub uuid: Uuid,
    pub value: String,
    pub category_uuid: Uuid,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Create/edit payload for a tag value. A value belongs either to an
/// existing category (`category_uuid`) or to one created on the fly
/// (`category_name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValueRequest {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_uuid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_description: Option<String>,
}

impl TagValueRequest {
    #[must_use]
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_value<S: Into<String>>(mut self, value: S) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_category_uuid(mut self, category_uuid: Uuid) -> Self {
        self.category_uuid = Some(category_uuid);
        self
    }

    #[must_use]
    pub fn with_category_name<S: Into<String>>(mut self, category_name: S) -> Self {
        self.category_name = Some(category_name.into());
        self
    }

    #[must_use]
    pub fn with_category_description<S: Into<String>>(mut self, description: S) -> Self {
        self.category_description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagValueList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<TagValue>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCategoryList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<TagCategory>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentCount {
    #[serde(default)]
    pub value_uuid: Option<Uuid>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, alias = "asset_count")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentCounts {
    #[serde(default)]
    pub has_assignments: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub counts: Vec<AssignmentCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentAction {
    Add,
    Remove,
}

/// Bulk add/remove of tag values on assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetAssignmentUpdate {
    pub action: AssignmentAction,
    pub assets: Vec<Uuid>,
    #[serde(rename = "tags")]
    pub value_uuids: Vec<Uuid>,
}

impl AssetAssignmentUpdate {
    #[must_use]
    pub fn new(action: AssignmentAction, assets: Vec<Uuid>, value_uuids: Vec<Uuid>) -> Self {
        Self {
            action,
            assets,
            value_uuids,
        }
    }
}

/// A tag value assigned to one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetAssignment {
    pub value_uuid: Uuid,
    pub category_uuid: Uuid,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
