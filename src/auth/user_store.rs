//! User Storage
//! Mission: Hold user accounts in memory for the life of the process

use crate::auth::models::User;
use crate::auth::password::{hash_password, verify_password};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::info;

/// Registration failures
#[derive(Debug)]
pub enum CreateUserError {
    UsernameTaken,
    Hash(anyhow::Error),
}

impl std::fmt::Display for CreateUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateUserError::UsernameTaken => write!(f, "Username already exists"),
            CreateUserError::Hash(e) => write!(f, "{e:#}"),
        }
    }
}

impl std::error::Error for CreateUserError {}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    by_username: HashMap<String, usize>,
}

/// Append-only user storage with a username index
pub struct UserStore {
    inner: RwLock<Inner>,
    bcrypt_cost: u32,
}

impl UserStore {
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            bcrypt_cost,
        }
    }

    /// Create a new user. Ids are sequential starting at 1.
    pub fn create_user(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<User, CreateUserError> {
        if self.inner.read().by_username.contains_key(username) {
            return Err(CreateUserError::UsernameTaken);
        }

        // Hash outside the lock; bcrypt is slow on purpose.
        let password_hash =
            hash_password(password, self.bcrypt_cost).map_err(CreateUserError::Hash)?;

        let mut inner = self.inner.write();
        // Re-check: another registration may have won the race while hashing.
        if inner.by_username.contains_key(username) {
            return Err(CreateUserError::UsernameTaken);
        }

        let user = User {
            id: inner.users.len() as u64 + 1,
            username: username.to_string(),
            role: role.to_string(),
            password_hash,
        };

        let index = inner.users.len();
        inner.users.push(user.clone());
        inner.by_username.insert(user.username.clone(), index);

        info!("✅ Created user: {} ({})", user.username, user.role);

        Ok(user)
    }

    /// Get user by username
    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        let inner = self.inner.read();
        inner
            .by_username
            .get(username)
            .and_then(|&index| inner.users.get(index))
            .cloned()
    }

    /// Return the user if the password matches
    pub fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let user = self.get_user_by_username(username)?;
        verify_password(password, &user.password_hash).then_some(user)
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn create_test_store() -> UserStore {
        UserStore::new(4)
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = create_test_store();

        let alice = store.create_user("alice", "pw123", "patient").unwrap();
        let bob = store.create_user("bob", "pw456", "doctor").unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_and_retrieve_user() {
        let store = create_test_store();
        assert!(store.is_empty());

        store.create_user("alice", "pw123", "patient").unwrap();

        let retrieved = store.get_user_by_username("alice").unwrap();
        assert_eq!(retrieved.username, "alice");
        assert_eq!(retrieved.role, "patient");
        assert_ne!(retrieved.password_hash, "pw123");

        assert!(store.get_user_by_username("nobody").is_none());
    }

    #[test]
    fn test_authenticate() {
        let store = create_test_store();
        store.create_user("alice", "pw123", "patient").unwrap();

        assert!(store.authenticate("alice", "pw123").is_some());
        assert!(store.authenticate("alice", "wrong").is_none());
        assert!(store.authenticate("nonexistent", "pw123").is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = create_test_store();
        store.create_user("alice", "pw123", "patient").unwrap();

        let err = store.create_user("alice", "other", "doctor").unwrap_err();
        assert!(matches!(err, CreateUserError::UsernameTaken));

        // Original record untouched
        assert_eq!(store.len(), 1);
        assert!(store.authenticate("alice", "pw123").is_some());
    }

    #[test]
    fn test_concurrent_registration_assigns_unique_ids() {
        let store = Arc::new(create_test_store());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .create_user(&format!("user{i}"), "pw", "patient")
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }
}
