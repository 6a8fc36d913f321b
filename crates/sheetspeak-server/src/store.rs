use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use sheetspeak_agent::Session;

use crate::error::AppError;

/// In-memory sessions keyed by id.
///
/// Each session sits behind its own mutex so an instruction runs to
/// completion before the next one on the same session starts.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
    history_limit: usize,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(history_limit: usize, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            history_limit,
            max_sessions,
        }
    }

    /// Open a fresh session without a dataset
    pub async fn create(&self) -> Result<(Uuid, Arc<Mutex<Session>>), AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(AppError::SessionLimit(self.max_sessions));
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new(self.history_limit)));
        sessions.insert(id, Arc::clone(&session));
        tracing::info!(%id, open = sessions.len(), "session created");
        Ok((id, session))
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
    }

    /// Remove a session; returns whether it existed
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(&id).is_some();
        if removed {
            tracing::info!(%id, "session closed");
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(100, 1024)
    }
}
