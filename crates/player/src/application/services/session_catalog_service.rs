//! Session catalog - list, create and delete play sessions

use std::sync::Arc;

use talekeeper_domain::{NewSession, SessionInfo, SessionRef};

use crate::application::error::ServiceError;
use crate::ports::outbound::SessionGatewayPort;

pub struct SessionCatalogService {
    gateway: Arc<dyn SessionGatewayPort>,
}

impl SessionCatalogService {
    pub fn new(gateway: Arc<dyn SessionGatewayPort>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<SessionInfo>, ServiceError> {
        Ok(self.gateway.list_sessions().await?)
    }

    /// Start a new session. The name must not be blank.
    pub async fn create(&self, name: &str, start_prompt: &str) -> Result<SessionInfo, ServiceError> {
        let new_session = NewSession::new(name, start_prompt)?;
        let info = self.gateway.create_session(&new_session).await?;
        tracing::info!(session = %info.id, name = %info.name, "Session created");
        Ok(info)
    }

    pub async fn delete(&self, session: &SessionRef) -> Result<(), ServiceError> {
        self.gateway.delete_session(session).await?;
        tracing::info!(session = %session, "Session deleted");
        Ok(())
    }
}
