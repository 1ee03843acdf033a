//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the in-memory session registry.

use chrono::{DateTime, Duration, Utc};
use codesnack_core::{
    generation::ContentGenerator,
    layout::LayoutOptions,
    ports::{TextGenerationService, VideoSearchService},
    session::SessionController,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub llm_adapter: Arc<dyn TextGenerationService>,
    pub video_adapter: Arc<dyn VideoSearchService>,
    pub temperature: f32,
    pub layout: LayoutOptions,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(
        llm_adapter: Arc<dyn TextGenerationService>,
        video_adapter: Arc<dyn VideoSearchService>,
        temperature: f32,
    ) -> Self {
        Self {
            llm_adapter,
            video_adapter,
            temperature,
            layout: LayoutOptions::default(),
            sessions: SessionRegistry::default(),
        }
    }

    /// Creates and registers a fresh session wired to the shared adapters.
    pub async fn open_session(&self) -> SharedSession {
        let controller = SessionController::new(
            ContentGenerator::new(self.llm_adapter.clone()),
            self.video_adapter.clone(),
            self.temperature,
        );
        self.sessions.insert(controller).await
    }
}

//=========================================================================================
// SessionRegistry (One Controller per Learner Session)
//=========================================================================================

/// A session controller behind its own lock; one action at a time per session.
pub type SharedSession = Arc<Mutex<SessionController>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionRegistry {
    pub async fn insert(&self, controller: SessionController) -> SharedSession {
        let id = controller.id();
        let shared = Arc::new(Mutex::new(controller));
        self.sessions.write().await.insert(id, shared.clone());
        shared
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle for longer than `max_idle`. Returns how many were removed.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        self.evict_idle_at(Utc::now(), max_idle).await
    }

    /// Sessions that are mid-action (locked) are never evicted.
    pub async fn evict_idle_at(&self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let cutoff = now - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(controller) => controller.last_active_at() >= cutoff,
            Err(_) => true,
        });
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use codesnack_core::domain::VideoResult;
    use codesnack_core::ports::PortResult;

    struct Silent;

    #[async_trait]
    impl TextGenerationService for Silent {
        async fn complete(&self, _prompt: &str, _temperature: Option<f32>) -> PortResult<String> {
            Ok("no".to_string())
        }
    }

    #[async_trait]
    impl VideoSearchService for Silent {
        async fn search_first_video(&self, _query: &str) -> PortResult<Option<VideoResult>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn sessions_are_registered_independently() {
        let state = AppState::new(Arc::new(Silent), Arc::new(Silent), 0.7);
        let first = state.open_session().await;
        let second = state.open_session().await;

        let first_id = first.lock().await.id();
        let second_id = second.lock().await.id();
        assert_ne!(first_id, second_id);
        assert_eq!(state.sessions.len().await, 2);

        first.lock().await.set_custom_prompt("only here".to_string());
        let found = state.sessions.get(second_id).await.unwrap();
        assert_eq!(found.lock().await.custom_prompt(), "");
        assert!(state.sessions.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted() {
        let state = AppState::new(Arc::new(Silent), Arc::new(Silent), 0.7);
        let idle = state.open_session().await;
        let busy = state.open_session().await;
        let idle_id = idle.lock().await.id();
        let busy_id = busy.lock().await.id();

        assert_eq!(state.sessions.evict_idle(Duration::hours(1)).await, 0);
        assert_eq!(state.sessions.len().await, 2);

        let _in_flight = busy.lock().await;
        let later = Utc::now() + Duration::hours(2);
        let evicted = state.sessions.evict_idle_at(later, Duration::hours(1)).await;

        assert_eq!(evicted, 1);
        assert!(state.sessions.get(idle_id).await.is_none());
        assert!(state.sessions.get(busy_id).await.is_some());
    }
}
