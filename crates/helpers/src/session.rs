//! Session guard

use tracing::instrument;

use tio_common::{SessionApi, TenableIoError, TioResult};

pub struct SessionHelper<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C> SessionHelper<'a, C>
where
    C: SessionApi + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Fail with `NotAuthorized` unless there is a session with an id.
    #[instrument(skip(self))]
    pub async fn validate(&self) -> TioResult<()> {
        match self.client.active_session().await? {
            Some(session) if session.id.is_some() => Ok(()),
            _ => Err(TenableIoError::NotAuthorized(
                "No active authorized session".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTenable;
    use tio_common::Session;

    #[tokio::test]
    async fn missing_session_is_not_authorized() {
        let mock = MockTenable::new().with_session(None);
        let err = SessionHelper::new(&mock).validate().await.unwrap_err();
        assert!(err.is_not_authorized());
    }

    #[tokio::test]
    async fn session_without_id_is_not_authorized() {
        let mock = MockTenable::new().with_session(Some(Session::default()));
        assert!(SessionHelper::new(&mock).validate().await.is_err());
    }

    #[tokio::test]
    async fn session_with_id_passes() {
        let session = Session {
            id: Some("abc".to_string()),
            ..Default::default()
        };
        let mock = MockTenable::new().with_session(Some(session));
        assert!(SessionHelper::new(&mock).validate().await.is_ok());
    }
}
