//! The current-user session and its persisted mirror

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::error::Error;
use crate::models::Account;
use crate::storage::{client_session_key, Storage, StoreResult, CURRENT_USER_KEY};

/// Holds zero or one logged-in account, mirrored under one storage key
pub struct SessionHolder<S> {
    storage: S,
    key: String,
    current: RwLock<Option<Account>>,
}

impl<S: Storage> SessionHolder<S> {
    /// Rehydrate the session mirrored under [`CURRENT_USER_KEY`]
    pub fn restore(storage: S) -> StoreResult<Self> {
        Self::restore_from(storage, CURRENT_USER_KEY.to_string())
    }

    /// Rehydrate the session of one client, mirrored under its own key
    pub fn restore_client(storage: S, client_id: &str) -> StoreResult<Self> {
        Self::restore_from(storage, client_session_key(client_id))
    }

    /// A mirror without a non-empty username and email, or that does not
    /// parse as an account, is removed and no session is established.
    fn restore_from(storage: S, key: String) -> StoreResult<Self> {
        let current = match storage.get_item(&key)? {
            None => None,
            Some(raw) => match parse_mirror(&raw) {
                Some(account) => {
                    tracing::debug!(username = %account.username, "Session restored");
                    Some(account)
                }
                None => {
                    tracing::warn!(key = %key, "Invalid persisted session, clearing");
                    storage.remove_item(&key)?;
                    None
                }
            },
        };

        Ok(Self {
            storage,
            key,
            current: RwLock::new(current),
        })
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Option<Account>>> {
        self.current
            .read()
            .map_err(|_| Error::Storage("session lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Option<Account>>> {
        self.current
            .write()
            .map_err(|_| Error::Storage("session lock poisoned".to_string()))
    }

    /// Copy of the logged-in account, if any
    pub fn current(&self) -> StoreResult<Option<Account>> {
        Ok(self.read()?.clone())
    }

    pub fn is_authenticated(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_some())
    }

    /// Make `account` the current session, replacing any previous one
    pub fn establish(&self, account: Account) -> StoreResult<()> {
        let mut current = self.write()?;
        let json = serde_json::to_string(&account)?;
        self.storage.set_item(&self.key, &json)?;
        *current = Some(account);
        Ok(())
    }

    /// Clear the in-memory session and its mirror
    pub fn clear(&self) -> StoreResult<()> {
        let mut current = self.write()?;
        if let Some(account) = current.take() {
            tracing::info!(username = %account.username, "Logged out");
        }
        self.storage.remove_item(&self.key)
    }
}

fn parse_mirror(raw: &str) -> Option<Account> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let filled = |field: &str| {
        value
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|v| !v.is_empty())
    };
    if !filled("username") || !filled("email") {
        return None;
    }
    serde_json::from_value(value).ok()
}
