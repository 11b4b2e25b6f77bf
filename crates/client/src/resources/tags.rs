use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use tio_common::{
    AssetAssignment, AssetAssignmentUpdate, AssignmentCounts, TagCategory, TagCategoryList,
    TagValue, TagValueList, TagValueRequest, TioResult,
};

use crate::client::TenableIoClient;

#[derive(Deserialize)]
struct CategoryValues {
    #[serde(default)]
    values: Option<Vec<TagValue>>,
}

#[derive(Deserialize)]
struct AssetTags {
    #[serde(default)]
    tags: Option<Vec<AssetAssignment>>,
}

#[derive(Serialize)]
struct BulkDelete<'a> {
    values: &'a [Uuid],
}

/// Tag categories, values and asset assignments.
pub struct Tags<'a> {
    client: &'a TenableIoClient,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(client: &'a TenableIoClient) -> Self {
        Self { client }
    }

    // categories

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> TioResult<TagCategoryList> {
        self.client.get("tags/categories").await
    }

    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn create_category(&self, category: &TagCategory) -> TioResult<TagCategory> {
        self.client
            .send_json(Method::POST, "tags/categories", category)
            .await
    }

    #[instrument(skip(self))]
    pub async fn category_details(&self, category_uuid: Uuid) -> TioResult<TagCategory> {
        self.client
            .get(&format!("tags/categories/{category_uuid}"))
            .await
    }

    #[instrument(skip(self, category))]
    pub async fn edit_category(&self, category_uuid: Uuid, category: &TagCategory) -> TioResult<TagCategory> {
        self.client
            .send_json(Method::PUT, &format!("tags/categories/{category_uuid}"), category)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, category_uuid: Uuid) -> TioResult<()> {
        self.client
            .delete(&format!("tags/categories/{category_uuid}"))
            .await
    }

    #[instrument(skip(self))]
    pub async fn category_values(&self, category_uuid: Uuid) -> TioResult<Vec<TagValue>> {
        let list: CategoryValues = self
            .client
            .get(&format!("tags/categories/{category_uuid}/values"))
            .await?;
        Ok(list.values.unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn count_category_assets(&self, category_uuid: Uuid) -> TioResult<AssignmentCounts> {
        self.client
            .get(&format!("tags/categories/{category_uuid}/counts"))
            .await
    }

    // values

    #[instrument(skip(self))]
    pub async fn list_values(&self) -> TioResult<TagValueList> {
        self.client.get("tags/values").await
    }

    #[instrument(skip(self, request), fields(value = %request.value))]
    pub async fn create_value(&self, request: &TagValueRequest) -> TioResult<TagValue> {
        self.client
            .send_json(Method::POST, "tags/values", request)
            .await
    }

    #[instrument(skip(self))]
    pub async fn value_details(&self, value_uuid: Uuid) -> TioResult<TagValue> {
        self.client.get(&format!("tags/values/{value_uuid}")).await
    }

    /// Look a value up through its category.
    #[instrument(skip(self))]
    pub async fn details_by_uuids(&self, category_uuid: Uuid, value_uuid: Uuid) -> TioResult<TagValue> {
        self.client
            .get(&format!("tags/categories/{category_uuid}/values/{value_uuid}"))
            .await
    }

    #[instrument(skip(self, request))]
    pub async fn edit_value(&self, value_uuid: Uuid, request: &TagValueRequest) -> TioResult<TagValue> {
        self.client
            .send_json(Method::PUT, &format!("tags/values/{value_uuid}"), request)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_value(&self, value_uuid: Uuid) -> TioResult<()> {
        self.client
            .delete(&format!("tags/values/{value_uuid}"))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_values(&self, value_uuids: &[Uuid]) -> TioResult<()> {
        self.client
            .execute(
                Method::POST,
                "tags/values/delete-requests",
                Some(&BulkDelete { values: value_uuids }),
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn count_value_assets(&self, value_uuid: Uuid) -> TioResult<AssignmentCounts> {
        self.client
            .get(&format!("tags/values/{value_uuid}/counts"))
            .await
    }

    // assets

    #[instrument(skip(self, update), fields(action = ?update.action))]
    pub async fn update_assignments(&self, update: &AssetAssignmentUpdate) -> TioResult<()> {
        self.client
            .execute(Method::POST, "tags/assets/assignments", Some(update))
            .await
    }

    #[instrument(skip(self))]
    pub async fn asset_assignments(&self, asset_uuid: Uuid) -> TioResult<Vec<AssetAssignment>> {
        let list: AssetTags = self
            .client
            .get(&format!("tags/assets/{asset_uuid}/assignments"))
            .await?;
        Ok(list.tags.unwrap_or_default())
    }
}
