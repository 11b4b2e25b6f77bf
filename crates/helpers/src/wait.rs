//! Poll-until-terminal loop shared by scan references

use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use tio_common::{ScanStatus, ScansApi, TenableIoError, TioResult};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// How a reference waits for its scan to settle.
///
/// No timeout means the loop only ends on a terminal status, an error
/// from the status check, or cancellation.
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    pub poll_interval: Duration,
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            cancel: None,
        }
    }
}

impl WaitPolicy {
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    async fn pause(&self, remaining: Option<Duration>) -> TioResult<()> {
        let nap = match remaining {
            Some(left) => self.poll_interval.min(left),
            None => self.poll_interval,
        };
        match &self.cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => Err(TenableIoError::Interrupted),
                _ = tokio::time::sleep(nap) => Ok(()),
            },
            None => {
                tokio::time::sleep(nap).await;
                Ok(())
            }
        }
    }
}

/// Poll `id` until its status is terminal and return that status.
pub(crate) async fn wait_until_terminal<C>(client: &C, id: i64, policy: &WaitPolicy) -> TioResult<ScanStatus>
where
    C: ScansApi + ?Sized,
{
    let started = Instant::now();
    loop {
        if policy.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(TenableIoError::Interrupted);
        }

        let status = client.scan_status(id).await?;
        if status.is_terminal() {
            debug!(scan = id, %status, "scan settled");
            return Ok(status);
        }

        let remaining = match policy.timeout {
            Some(limit) => {
                let elapsed = started.elapsed();
                if elapsed >= limit {
                    return Err(TenableIoError::Timeout(format!(
                        "scan {id} still {status} after {elapsed:?}"
                    )));
                }
                Some(limit - elapsed)
            }
            None => None,
        };

        debug!(scan = id, %status, "waiting for scan to settle");
        policy.pause(remaining).await?;
    }
}
