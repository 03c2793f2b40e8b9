use std::sync::Arc;

use storage::repository::{SessionStorage, TOKEN_KEY};
use tracing::{debug, info, warn};
use vdesk_core::model::SessionToken;

use crate::api::WorksheetApi;
use crate::error::SessionError;

/// Acquires and caches the bearer token for one tab scope.
#[derive(Clone)]
pub struct SessionService {
    api: Arc<dyn WorksheetApi>,
    storage: Arc<dyn SessionStorage>,
    scope: String,
}

impl SessionService {
    #[must_use]
    pub fn new(
        api: Arc<dyn WorksheetApi>,
        storage: Arc<dyn SessionStorage>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            api,
            storage,
            scope: scope.into(),
        }
    }

    /// Read the token stored for this scope. Never touches the network.
    ///
    /// A blank stored value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if storage cannot be read.
    pub async fn restore(&self) -> Result<Option<SessionToken>, SessionError> {
        let stored = self.storage.get(&self.scope, TOKEN_KEY).await?;
        let token = stored.and_then(|raw| SessionToken::new(raw).ok());
        debug!(scope = %self.scope, found = token.is_some(), "restored session token");
        Ok(token)
    }

    /// Request a fresh token from the backend and store it.
    ///
    /// If the token cannot be stored it is still returned; it just will not
    /// survive a reload.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if the backend call fails.
    pub async fn acquire(&self) -> Result<SessionToken, SessionError> {
        let token = self.api.acquire_session().await?;
        if let Err(err) = self
            .storage
            .set(&self.scope, TOKEN_KEY, token.as_str())
            .await
        {
            warn!(scope = %self.scope, error = %err, "failed to persist session token");
        }
        info!(scope = %self.scope, "acquired session token");
        Ok(token)
    }

    /// Stored token if present, otherwise a freshly acquired one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if no token was stored and acquisition fails.
    pub async fn resolve(&self) -> Result<SessionToken, SessionError> {
        match self.restore().await {
            Ok(Some(token)) => return Ok(token),
            Ok(None) => {}
            Err(err) => {
                warn!(scope = %self.scope, error = %err, "session storage unreadable");
            }
        }
        self.acquire().await
    }

    /// Clear this scope's tab storage, token included. Other scopes are kept.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if storage cannot be written.
    pub async fn forget(&self) -> Result<(), SessionError> {
        self.storage.clear(&self.scope).await?;
        info!(scope = %self.scope, "cleared tab storage");
        Ok(())
    }
}
