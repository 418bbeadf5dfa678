//! Session and authentication service.
//!
//! Authentication is fully delegated to the external identity provider; no
//! credential is ever stored or compared locally. The in-memory current
//! user is the whole session state machine:
//! `Unauthenticated -> (login ok) -> Authenticated -> (logout) -> Unauthenticated`,
//! with a failed login looping back to Unauthenticated.
//!
//! The tokens of a successful login are persisted to a small JSON file so a
//! later run can restore the session, the same role the browser's persisted
//! token played in the original console. Post-login/post-logout navigation
//! is an explicit event on a watch channel consumed by the shell, not an
//! ambient observer.

use crate::errors::Result;
use crate::gateway::Gateway;
use crate::models::AuthUser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Serialize, Deserialize, Clone)]
struct StoredSession {
    access_token: String,
    refresh_token: String,
    user: AuthUser,
}

pub struct SessionService<G> {
    gateway: G,
    session_path: PathBuf,
    current_user: Option<AuthUser>,
    session: Option<StoredSession>,
    restored: bool,
    auth_events: watch::Sender<bool>,
}

impl<G: Gateway> SessionService<G> {
    pub fn new(gateway: G, session_path: PathBuf) -> Self {
        let (auth_events, _) = watch::channel(false);
        Self {
            gateway,
            session_path,
            current_user: None,
            session: None,
            restored: false,
            auth_events,
        }
    }

    /// Authenticates against the identity provider.
    ///
    /// On success the current user is set, the session is persisted, and an
    /// auth event is emitted. On failure nothing changes; the error is the
    /// caller's to surface.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthUser> {
        let session = self.gateway.sign_in_with_password(email, password).await?;

        let stored = StoredSession {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            user: session.user.clone(),
        };
        if let Err(e) = self.persist(&stored) {
            // A session that only lasts this run is still a valid session
            warn!("Failed to persist session file: {e}");
        }
        self.session = Some(stored);
        self.current_user = Some(session.user.clone());
        self.restored = true;
        self.auth_events.send_replace(true);
        info!("User {} authenticated", session.user.email);
        Ok(session.user)
    }

    /// Ends the session. Remote sign-out is best effort; the local state is
    /// always cleared.
    pub async fn logout(&mut self) {
        if let Some(session) = &self.session {
            if let Err(e) = self.gateway.sign_out(&session.access_token).await {
                warn!("Remote sign-out failed: {e}");
            }
        }
        self.current_user = None;
        self.session = None;
        self.restored = true;
        if self.session_path.exists() {
            if let Err(e) = fs::remove_file(&self.session_path) {
                warn!("Failed to remove session file: {e}");
            }
        }
        self.auth_events.send_replace(false);
        info!("Session closed");
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&AuthUser> {
        self.current_user.as_ref()
    }

    /// One-time restore of a persisted session, validated against the
    /// identity provider. Safe to call repeatedly; only the first call does
    /// work.
    pub async fn ensure_session_restored(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let Some(stored) = self.read_persisted() else {
            debug!("No persisted session to restore");
            return;
        };

        match self.gateway.get_user(&stored.access_token).await {
            Ok(user) => {
                debug!("Restored session for {}", user.email);
                self.current_user = Some(user);
                self.session = Some(stored);
                self.auth_events.send_replace(true);
            }
            Err(e) => {
                warn!("Persisted session is no longer valid: {e}");
                self.current_user = None;
            }
        }
    }

    /// Route guard: restores the session once, then answers whether the
    /// authenticated shell may be entered.
    pub async fn can_activate(&mut self) -> bool {
        self.ensure_session_restored().await;
        self.is_authenticated()
    }

    /// Auth events for the shell: `true` after login/restore, `false` after
    /// logout.
    pub fn subscribe_auth(&self) -> watch::Receiver<bool> {
        self.auth_events.subscribe()
    }

    fn persist(&self, stored: &StoredSession) -> Result<()> {
        if let Some(parent) = self.session_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.session_path, serde_json::to_string_pretty(stored)?)?;
        Ok(())
    }

    fn read_persisted(&self) -> Option<StoredSession> {
        let contents = fs::read_to_string(&self.session_path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(stored) => Some(stored),
            Err(e) => {
                warn!("Ignoring unreadable session file: {e}");
                None
            }
        }
    }
}
