//! Account registration, credential checks and credential reset

use std::sync::Mutex;

use chrono::Utc;

use crate::error::Error;
use crate::models::Account;
use crate::storage::{lock_writes, read_list, write_back, Loaded, Storage, StoreResult, USERS_KEY};

/// Trimmed value of an optional field, or None when it is blank
fn filled(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Account records persisted as one list under [`USERS_KEY`]
pub struct AccountStore<S> {
    storage: S,
    write_lock: Mutex<()>,
}

impl<S: Storage> AccountStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Load every account. A corrupted list is reset and flagged.
    pub fn accounts(&self) -> StoreResult<Loaded<Vec<Account>>> {
        read_list(&self.storage, USERS_KEY)
    }

    /// Register a new account from trimmed credentials
    pub fn register(&self, username: &str, password: &str, email: &str) -> StoreResult<Account> {
        if is_blank(username) || is_blank(password) || is_blank(email) {
            tracing::warn!("Registration rejected: missing fields");
            return Err(Error::Validation("All fields are required"));
        }
        let (username, password, email) = (username.trim(), password.trim(), email.trim());

        let _guard = lock_writes(&self.write_lock)?;
        let mut loaded = self.accounts()?;
        let accounts = &mut loaded.value;

        if accounts.iter().any(|a| a.username == username) {
            tracing::warn!(username, "Registration rejected: username exists");
            return Err(Error::UsernameTaken);
        }
        if accounts.iter().any(|a| a.email == email) {
            tracing::warn!(email, "Registration rejected: email exists");
            return Err(Error::EmailTaken);
        }

        let account = Account {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
            updated_at: None,
            role: None,
        };
        accounts.push(account.clone());
        write_back(&self.storage, USERS_KEY, &loaded)?;

        tracing::info!(username, email, "Account registered");
        Ok(account)
    }

    /// Find the account matching both trimmed credentials exactly
    pub fn authenticate(&self, username: &str, password: &str) -> StoreResult<Account> {
        if is_blank(username) || is_blank(password) {
            return Err(Error::Validation("Username and password are required"));
        }
        let (username, password) = (username.trim(), password.trim());

        self.accounts()?
            .into_inner()
            .into_iter()
            .find(|a| a.username == username && a.password == password)
            .ok_or_else(|| {
                tracing::warn!(username, "Login rejected: invalid credentials");
                Error::InvalidCredentials
            })
    }

    /// Overwrite the username and/or password of the account owning `email`.
    ///
    /// Blank optional fields keep the stored value.
    pub fn reset_credentials(
        &self,
        email: &str,
        new_username: Option<&str>,
        new_password: Option<&str>,
    ) -> StoreResult<Account> {
        if is_blank(email) {
            return Err(Error::Validation("Email is required"));
        }
        let (new_username, new_password) = (filled(new_username), filled(new_password));
        if new_username.is_none() && new_password.is_none() {
            return Err(Error::Validation("Provide at least a new username or password"));
        }
        let email = email.trim();

        let _guard = lock_writes(&self.write_lock)?;
        let mut loaded = self.accounts()?;
        let accounts = &mut loaded.value;

        let index = accounts
            .iter()
            .position(|a| a.email == email)
            .ok_or(Error::EmailNotFound)?;

        if let Some(username) = new_username {
            let taken = accounts
                .iter()
                .enumerate()
                .any(|(i, a)| i != index && a.username == username);
            if taken {
                return Err(Error::UsernameTaken);
            }
        }

        let account = &mut accounts[index];
        if let Some(username) = new_username {
            account.username = username.to_string();
        }
        if let Some(password) = new_password {
            account.password = password.to_string();
        }
        account.updated_at = Some(Utc::now());
        let updated = account.clone();

        write_back(&self.storage, USERS_KEY, &loaded)?;

        tracing::info!(email, username = %updated.username, "Credentials reset");
        Ok(updated)
    }
}
