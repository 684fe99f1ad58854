//! In-process `UserStore` used in development (no DATABASE_URL) and in tests.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{ProfileUpdate, UserRecord, UserStore};

#[derive(Clone, Debug, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: UserRecord) -> RepoResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| RepoError::Unavailable("user map lock poisoned".into()))?;
        users.insert(record.username.clone(), record);
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_by_username(&self, username: &str) -> RepoResult<Option<UserRecord>> {
        let users = self
            .users
            .read()
            .map_err(|_| RepoError::Unavailable("user map lock poisoned".into()))?;
        Ok(users.get(username).cloned())
    }

    async fn update_by_username(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> RepoResult<Option<UserRecord>> {
        let mut users = self
            .users
            .write()
            .map_err(|_| RepoError::Unavailable("user map lock poisoned".into()))?;

        let Some(record) = users.get_mut(username) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            record.name = Some(name.clone());
        }
        if let Some(email) = &update.email {
            record.email = Some(email.clone());
        }

        Ok(Some(record.clone()))
    }
}
