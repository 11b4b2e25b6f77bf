//! Folder handles

use std::fmt;
use tracing::instrument;

use tio_common::{Folder, TenableIo, TenableIoError, TioResult};

use crate::progress::StopAllReport;
use crate::scan_helper::ScanHelper;
use crate::scan_ref::ScanRef;
use crate::wait::WaitPolicy;

/// A folder id plus a borrowed client.
pub struct FolderRef<'a, C: ?Sized> {
    client: &'a C,
    id: i64,
    policy: WaitPolicy,
}

impl<C: ?Sized> fmt::Debug for FolderRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderRef").field("id", &self.id).finish()
    }
}

impl<'a, C> FolderRef<'a, C>
where
    C: TenableIo + ?Sized,
{
    pub fn new(client: &'a C, id: i64) -> Self {
        Self::with_policy(client, id, WaitPolicy::default())
    }

    pub fn with_policy(client: &'a C, id: i64, policy: WaitPolicy) -> Self {
        Self { client, id, policy }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    fn scan_helper(&self) -> ScanHelper<'a, C> {
        ScanHelper::with_policy(self.client, self.policy.clone())
    }

    pub async fn details(&self) -> TioResult<Folder> {
        self.client
            .list_folders()
            .await?
            .into_iter()
            .find(|f| f.id == self.id)
            .ok_or_else(|| TenableIoError::NotFound(format!("folder {}", self.id)))
    }

    pub async fn name(&self) -> TioResult<String> {
        Ok(self.details().await?.name)
    }

    pub async fn scans(&self) -> TioResult<Vec<ScanRef<'a, C>>> {
        self.scan_helper().scans(Some(self.id)).await
    }

    /// Stop every scan in this folder and wait for all of them.
    #[instrument(skip(self), fields(folder = self.id))]
    pub async fn stop_all(&self) -> TioResult<StopAllReport> {
        self.scan_helper().stop_all_in_folder(self.id).await
    }

    pub async fn delete(&self) -> TioResult<()> {
        self.client.delete_folder(self.id).await
    }
}

pub struct FolderHelper<'a, C: ?Sized> {
    client: &'a C,
    policy: WaitPolicy,
}

impl<'a, C> FolderHelper<'a, C>
where
    C: TenableIo + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self::with_policy(client, WaitPolicy::default())
    }

    pub fn with_policy(client: &'a C, policy: WaitPolicy) -> Self {
        Self { client, policy }
    }

    /// Reference to a folder by id, without checking it exists.
    pub fn folder(&self, id: i64) -> FolderRef<'a, C> {
        FolderRef::with_policy(self.client, id, self.policy.clone())
    }

    pub async fn folders(&self) -> TioResult<Vec<FolderRef<'a, C>>> {
        let folders = self.client.list_folders().await?;
        Ok(folders.into_iter().map(|f| self.folder(f.id)).collect())
    }

    /// First folder named exactly `name`.
    pub async fn folder_by_name(&self, name: &str) -> TioResult<Option<FolderRef<'a, C>>> {
        let folders = self.client.list_folders().await?;
        Ok(folders
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| self.folder(f.id)))
    }

    pub async fn create(&self, name: &str) -> TioResult<FolderRef<'a, C>> {
        let id = self.client.create_folder(name).await?;
        Ok(self.folder(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{folder, MockTenable};
    use std::time::Duration;
    use tio_common::{Scan, ScanStatus};

    #[tokio::test]
    async fn find_folder_by_exact_name() {
        let mock = MockTenable::new()
            .with_folder(folder(3, "Ops"), vec![])
            .with_folder(folder(4, "ops"), vec![]);
        let folders = FolderHelper::new(&mock);

        let found = folders.folder_by_name("ops").await.unwrap().unwrap();
        assert_eq!(found.id(), 4);
        assert_eq!(found.name().await.unwrap(), "ops");
        assert!(folders.folder_by_name("Audit").await.unwrap().is_none());
        assert_eq!(folders.folders().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_and_delete_folder() {
        let mock = MockTenable::new();
        let folders = FolderHelper::new(&mock);
        let created = folders.create("Audit").await.unwrap();
        assert_eq!(created.name().await.unwrap(), "Audit");

        created.delete().await.unwrap();
        assert!(created.details().await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn folder_stop_all_uses_folder_scans() {
        let mock = MockTenable::new()
            .with_folder(
                folder(7, "Ops"),
                vec![Scan::new(2, "b", ScanStatus::Running)],
            )
            .with_statuses(2, vec![ScanStatus::Running, ScanStatus::Stopped]);
        let policy = WaitPolicy::default().with_poll_interval(Duration::from_millis(1));
        let ops = FolderRef::with_policy(&mock, 7, policy);

        assert_eq!(ops.scans().await.unwrap().len(), 1);
        let report = ops.stop_all().await.unwrap();
        assert_eq!(report.settled, 1);
        assert_eq!(mock.count("stop:2:false"), 1);
    }
}
