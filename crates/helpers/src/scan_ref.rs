//! Handle to one remote scan

use std::fmt;
use std::time::Duration;
use tracing::{info, instrument, warn};

use tio_common::{ScanDetails, ScanStatus, ScansApi, TenableIoError, TioResult};

use crate::wait::{wait_until_terminal, WaitPolicy};

/// A scan id plus a borrowed client. The id never changes once the
/// service assigned it; the remote scan may still disappear underneath.
pub struct ScanRef<'a, C: ?Sized> {
    client: &'a C,
    id: i64,
    policy: WaitPolicy,
}

impl<C: ?Sized> Clone for ScanRef<'_, C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            id: self.id,
            policy: self.policy.clone(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for ScanRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanRef").field("id", &self.id).finish()
    }
}

impl<'a, C> ScanRef<'a, C>
where
    C: ScansApi + ?Sized,
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

    #[inline]
    #[must_use]
    pub fn wait_policy(&self) -> &WaitPolicy {
        &self.policy
    }

    pub async fn details(&self) -> TioResult<ScanDetails> {
        self.client.scan_details(self.id).await
    }

    pub async fn status(&self) -> TioResult<ScanStatus> {
        self.client.scan_status(self.id).await
    }

    pub async fn name(&self) -> TioResult<Option<String>> {
        Ok(self.details().await?.info.name)
    }

    pub async fn is_stopped(&self) -> TioResult<bool> {
        Ok(self.status().await?.is_terminal())
    }

    /// Launch the scan, optionally against different targets. Returns the run uuid.
    #[instrument(skip(self, alt_targets), fields(scan = self.id))]
    pub async fn launch(&self, alt_targets: Option<&[String]>) -> TioResult<String> {
        let run = self.client.launch_scan(self.id, alt_targets).await?;
        info!(run = %run, "scan launched");
        Ok(run)
    }

    #[instrument(skip(self), fields(scan = self.id))]
    pub async fn stop(&self, force: bool) -> TioResult<()> {
        self.client.stop_scan(self.id, force).await
    }

    pub async fn pause(&self) -> TioResult<()> {
        self.client.pause_scan(self.id).await
    }

    pub async fn resume(&self) -> TioResult<()> {
        self.client.resume_scan(self.id).await
    }

    pub async fn delete(&self) -> TioResult<()> {
        self.client.delete_scan(self.id).await
    }

    /// Block until the scan reports a terminal status.
    #[instrument(skip(self), fields(scan = self.id))]
    pub async fn wait_until_stopped(&self) -> TioResult<ScanStatus> {
        wait_until_terminal(self.client, self.id, &self.policy).await
    }

    pub async fn stop_and_wait(&self, force: bool) -> TioResult<ScanStatus> {
        self.stop(force).await?;
        self.wait_until_stopped().await
    }

    /// Wait up to `limit` for the scan to settle on its own; past that,
    /// request a stop and wait again under the regular policy.
    #[instrument(skip(self), fields(scan = self.id))]
    pub async fn wait_or_stop(&self, limit: Duration) -> TioResult<ScanStatus> {
        let bounded = self.policy.clone().with_timeout(Some(limit));
        match wait_until_terminal(self.client, self.id, &bounded).await {
            Err(TenableIoError::Timeout(reason)) => {
                warn!(%reason, "scan did not settle in time, stopping it");
                if let Err(e) = self.stop(false).await {
                    warn!(error = %e, "stop request failed");
                }
                self.wait_until_stopped().await
            }
            other => other,
        }
    }
}
