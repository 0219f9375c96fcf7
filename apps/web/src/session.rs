use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::models::User;

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    generation: u64,
}

/// Client-held user state shared by every view. Writes bump a generation
/// counter so views can tell when their copy is stale.
#[derive(Debug, Clone, Default)]
pub struct UserSession {
    state: Arc<RwLock<SessionState>>,
}

impl UserSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        let session = Self::new();
        session.set_user(user);
        session
    }

    pub fn current(&self) -> Option<User> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .clone()
    }

    pub fn generation(&self) -> u64 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    /// Replaces the stored user wholesale.
    pub fn set_user(&self, user: User) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.user = Some(user);
        state.generation += 1;
    }

    pub fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.user = None;
        state.generation += 1;
    }

    /// Session credential sent with authenticated requests.
    pub fn credential(&self) -> Option<Uuid> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .as_ref()
            .map(|u| u.id)
    }
}
