//! In-memory declaration sessions

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use core_kernel::DeclarationId;
use domain_claims::validation::WizardRules;
use domain_claims::wizard::{WizardController, WizardView};

use crate::error::ApiError;

/// Sessions left untouched this long are evicted
pub const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Open wizard sessions keyed by declaration
///
/// Each session is touched under the write lock only for the duration of a
/// synchronous controller call; nothing awaits while holding it.
#[derive(Debug, Clone)]
pub struct DeclarationStore {
    sessions: Arc<RwLock<HashMap<DeclarationId, WizardController>>>,
    idle_ttl: Duration,
}

impl Default for DeclarationStore {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_SESSION_IDLE_TTL)
    }
}

impl DeclarationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl,
        }
    }

    /// Opens a fresh session, evicting idle ones first
    pub async fn open(&self, rules: WizardRules) -> WizardView {
        self.evict_idle().await;
        let controller = WizardController::new(rules);
        let view = controller.view();
        self.sessions.write().await.insert(controller.id(), controller);
        info!(declaration_id = %view.declaration_id, "Declaration opened");
        view
    }

    /// Runs `f` against the session
    pub async fn with_session<R>(
        &self,
        id: DeclarationId,
        f: impl FnOnce(&mut WizardController) -> R,
    ) -> Result<R, ApiError> {
        let mut sessions = self.sessions.write().await;
        let controller = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Declaration {id}")))?;
        Ok(f(controller))
    }

    pub async fn view(&self, id: DeclarationId) -> Result<WizardView, ApiError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(WizardController::view)
            .ok_or_else(|| ApiError::NotFound(format!("Declaration {id}")))
    }

    /// Closes the session; a submission still in flight for it is discarded
    pub async fn close(&self, id: DeclarationId) -> Result<(), ApiError> {
        let mut controller = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Declaration {id}")))?;
        controller.abandon();
        info!(declaration_id = %id, "Declaration closed");
        Ok(())
    }

    /// Drops sessions not modified within the idle TTL
    ///
    /// Sessions with a submission in flight are kept.
    pub async fn evict_idle(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let expired: Vec<DeclarationId> = sessions
            .iter()
            .filter(|(_, c)| !c.is_submitting() && self.is_idle(c.updated_at(), now))
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            if let Some(mut controller) = sessions.remove(id) {
                controller.abandon();
            }
        }
        if !expired.is_empty() {
            info!(evicted = expired.len(), remaining = sessions.len(), "Idle declarations evicted");
        }
        expired.len()
    }

    fn is_idle(&self, updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(updated_at)
            .to_std()
            .map(|idle| idle > self.idle_ttl)
            .unwrap_or(false)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::catalog::ClaimType;

    #[tokio::test]
    async fn test_open_and_mutate() {
        let store = DeclarationStore::new();
        let view = store.open(WizardRules::default()).await;

        store
            .with_session(view.declaration_id, |w| w.select_claim_type(ClaimType::AutoTheft))
            .await
            .unwrap()
            .unwrap();

        let view = store.view(view.declaration_id).await.unwrap();
        assert!(view.can_advance);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_close_removes_session() {
        let store = DeclarationStore::new();
        let view = store.open(WizardRules::default()).await;
        store.close(view.declaration_id).await.unwrap();

        assert!(store.is_empty().await);
        assert!(matches!(store.view(view.declaration_id).await, Err(ApiError::NotFound(_))));
        assert!(store.close(view.declaration_id).await.is_err());
    }

    #[tokio::test]
    async fn test_idle_sessions_evicted_on_open() {
        let store = DeclarationStore::with_idle_ttl(Duration::from_millis(10));
        let stale = store.open(WizardRules::default()).await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        let fresh = store.open(WizardRules::default()).await;

        assert_eq!(store.len().await, 1);
        assert!(matches!(store.view(stale.declaration_id).await, Err(ApiError::NotFound(_))));
        assert!(store.view(fresh.declaration_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_recent_activity_keeps_session() {
        let store = DeclarationStore::with_idle_ttl(Duration::from_millis(200));
        let view = store.open(WizardRules::default()).await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        store
            .with_session(view.declaration_id, |w| w.select_claim_type(ClaimType::HomeFire))
            .await
            .unwrap()
            .unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(store.evict_idle().await, 0);
        assert!(store.view(view.declaration_id).await.is_ok());
    }
}
