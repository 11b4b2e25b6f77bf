//! Session resource

use async_trait::async_trait;
use tracing::{debug, instrument};

use tio_common::{Session, SessionApi, TioResult};

use crate::client::TenableIoClient;

#[async_trait]
impl SessionApi for TenableIoClient {
    /// Rejected credentials and a `null` body both mean "no session"
    /// rather than a failure.
    #[instrument(skip(self))]
    async fn active_session(&self) -> TioResult<Option<Session>> {
        match self.get::<Option<Session>>("session").await {
            Ok(session) => Ok(session),
            Err(e) if e.is_not_authorized() => {
                debug!(error = %e, "no authorized session");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
