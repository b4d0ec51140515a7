//! Single-flight session lifecycle for the chat backend connection.
//!
//! At most one live connection per identity. Concurrent connect attempts for
//! the same identity serialize on the session lock and all observe the one
//! resulting connection; switching identities tears the old session down
//! completely before the new connect starts.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::backend::{ChatConnector, ChatUser};
use crate::error::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStatus {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    Disconnecting,
}

struct ActiveSession {
    user_id: String,
}

pub struct SessionBridge<C: ChatConnector> {
    connector: Arc<C>,
    // Held across connect/disconnect, which is what makes connects single-flight.
    session: tokio::sync::Mutex<Option<ActiveSession>>,
    status: Mutex<BridgeStatus>,
}

impl<C: ChatConnector> SessionBridge<C> {
    pub fn new(connector: Arc<C>) -> Self {
        Self {
            connector,
            session: tokio::sync::Mutex::new(None),
            status: Mutex::new(BridgeStatus::Disconnected),
        }
    }

    /// Advisory snapshot of the lifecycle state, for UI display.
    ///
    /// Status lives outside the session lock so it stays readable while a
    /// connect is in flight (that lock is held for the whole attempt). A
    /// reader racing a transition may briefly observe the previous state;
    /// anything that must be consistent with the live session should go
    /// through [`SessionBridge::connected_as`] instead.
    pub fn status(&self) -> BridgeStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_status(&self, status: BridgeStatus) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }

    /// Connect as `user`, reusing the live session when the identity matches.
    ///
    /// On identity change the previous session is disconnected (awaited to
    /// completion, failures logged) before the new connect is attempted.
    pub async fn connect_as(&self, user: &ChatUser, token: &str) -> Result<(), ChatError> {
        let mut session = self.session.lock().await;

        let previous = match session.as_ref() {
            Some(active) if active.user_id == user.id => return Ok(()),
            Some(active) => Some(active.user_id.clone()),
            None => None,
        };

        if let Some(old_id) = previous {
            self.set_status(BridgeStatus::Reconnecting);
            if let Err(err) = self.connector.disconnect(&old_id).await {
                warn!(user = %old_id, "disconnect before identity switch failed: {err}");
            }
            *session = None;
        } else {
            self.set_status(BridgeStatus::Connecting);
        }

        match self.connector.connect(user, token).await {
            Ok(()) => {
                *session = Some(ActiveSession {
                    user_id: user.id.clone(),
                });
                self.set_status(BridgeStatus::Connected);
                Ok(())
            }
            Err(err) => {
                self.set_status(BridgeStatus::Disconnected);
                Err(err)
            }
        }
    }

    /// Best-effort teardown. Failures are logged, never surfaced; the bridge
    /// always ends up `Disconnected`.
    pub async fn disconnect(&self) {
        let mut session = self.session.lock().await;
        if let Some(active) = session.take() {
            self.set_status(BridgeStatus::Disconnecting);
            if let Err(err) = self.connector.disconnect(&active.user_id).await {
                warn!(user = %active.user_id, "disconnect failed: {err}");
            }
        }
        self.set_status(BridgeStatus::Disconnected);
    }

    /// Identity of the live session, if any.
    pub async fn connected_as(&self) -> Option<String> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|s| s.user_id.clone())
    }
}
