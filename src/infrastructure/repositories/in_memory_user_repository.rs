//! In-memory implementation of the user repository port.
//!
//! Backs tests and storage-free embeddings. Like a real backend it enforces
//! username/email uniqueness atomically: the check and the insert happen
//! under one write lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::entities::{User, UserRepository};
use crate::shared::error::RepositoryError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    fn find<F>(&self, predicate: F) -> Option<User>
    where
        F: Fn(&User) -> bool,
    {
        self.users.read().values().find(|u| predicate(u)).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.find(|u| u.username.as_str() == username))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let normalized = email.trim().to_lowercase();
        Ok(self.find(|u| u.email.as_str() == normalized))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        Ok(self.find(|u| u.username.as_str() == username).is_some())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let normalized = email.trim().to_lowercase();
        Ok(self.find(|u| u.email.as_str() == normalized).is_some())
    }

    async fn save(&self, user: &User) -> Result<User, RepositoryError> {
        let mut users = self.users.write();

        // Unique-constraint enforcement, atomic with the insert below
        let collision = users.values().any(|existing| {
            existing.id != user.id
                && (existing.username == user.username || existing.email == user.email)
        });
        if collision {
            return Err(RepositoryError::UniqueViolation {
                constraint: "users_username_email_key".to_string(),
            });
        }

        let mut stored = user.clone();
        let now = Utc::now();

        match stored.id {
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                stored.id = Some(id);
                stored.created_at = now;
                stored.updated_at = now;
                users.insert(id, stored.clone());
            }
            Some(id) => {
                if let Some(existing) = users.get(&id) {
                    stored.created_at = existing.created_at;
                }
                stored.updated_at = now;
                users.insert(id, stored.clone());
            }
        }

        Ok(stored)
    }

    async fn delete(&self, user: &User) -> Result<(), RepositoryError> {
        if let Some(id) = user.id {
            self.users.write().remove(&id);
        }
        Ok(())
    }

    async fn get_active_users(&self) -> Result<Vec<User>, RepositoryError> {
        let mut active: Vec<User> = self
            .users
            .read()
            .values()
            .filter(|u| u.is_active)
            .cloned()
            .collect();
        active.sort_by_key(|u| u.id);
        Ok(active)
    }
}
