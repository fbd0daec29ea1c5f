use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use savora_core::{DomainError, UserProfile};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidArgument(format!("`{value}` is not a session id")))
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("profile storage unavailable: {0}")]
    Unavailable(String),
}

/// Per-session profile storage. Profiles are never shared between sessions.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<UserProfile>, RepositoryError>;
    async fn save(&self, id: SessionId, profile: UserProfile) -> Result<(), RepositoryError>;
    /// Discards the profile; `false` when the session was unknown.
    async fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError>;
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<SessionId, UserProfile>>,
    /// 0 means unbounded.
    max_sessions: usize,
}

impl InMemoryProfileRepository {
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self { profiles: RwLock::default(), max_sessions }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<UserProfile>, RepositoryError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(id).cloned())
    }

    async fn save(&self, id: SessionId, profile: UserProfile) -> Result<(), RepositoryError> {
        let mut profiles = self.profiles.write().await;
        let at_capacity = self.max_sessions > 0 && profiles.len() >= self.max_sessions;
        if at_capacity && !profiles.contains_key(&id) {
            return Err(RepositoryError::Unavailable(format!(
                "session limit of {} reached",
                self.max_sessions
            )));
        }
        profiles.insert(id, profile);
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.remove(id).is_some())
    }
}
