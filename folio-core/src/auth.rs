//! Explicitly constructed authentication context
//!
//! Combines the account store with the session holder over one shared
//! storage handle. Construct one per storage instance and pass it to whatever
//! needs to log users in or inspect the current session. Servers with several
//! clients keep one [`SessionHolder`] per client through
//! [`AuthContext::client_session`].

use crate::accounts::AccountStore;
use crate::models::Account;
use crate::session::SessionHolder;
use crate::storage::{Storage, StoreResult};

pub struct AuthContext<S> {
    storage: S,
    accounts: AccountStore<S>,
    session: SessionHolder<S>,
}

impl<S: Storage + Clone> AuthContext<S> {
    /// Build the context, rehydrating any persisted session
    pub fn load(storage: S) -> StoreResult<Self> {
        Ok(Self {
            accounts: AccountStore::new(storage.clone()),
            session: SessionHolder::restore(storage.clone())?,
            storage,
        })
    }

    /// Rehydrate the session of one client, independent of every other
    pub fn client_session(&self, client_id: &str) -> StoreResult<SessionHolder<S>> {
        SessionHolder::restore_client(self.storage.clone(), client_id)
    }
}

impl<S: Storage> AuthContext<S> {
    pub fn accounts(&self) -> &AccountStore<S> {
        &self.accounts
    }

    pub fn register(&self, username: &str, password: &str, email: &str) -> StoreResult<Account> {
        self.accounts.register(username, password, email)
    }

    /// Check credentials and make the matching account the current session
    pub fn login(&self, username: &str, password: &str) -> StoreResult<Account> {
        self.login_into(&self.session, username, password)
    }

    /// Check credentials and establish the matching account in `session`
    pub fn login_into(
        &self,
        session: &SessionHolder<S>,
        username: &str,
        password: &str,
    ) -> StoreResult<Account> {
        let account = self.accounts.authenticate(username, password)?;
        session.establish(account.clone())?;
        tracing::info!(username = %account.username, "Login successful");
        Ok(account)
    }

    pub fn reset_credentials(
        &self,
        email: &str,
        new_username: Option<&str>,
        new_password: Option<&str>,
    ) -> StoreResult<Account> {
        self.accounts
            .reset_credentials(email, new_username, new_password)
    }

    pub fn logout(&self) -> StoreResult<()> {
        self.session.clear()
    }

    pub fn current_user(&self) -> StoreResult<Option<Account>> {
        self.session.current()
    }

    pub fn is_authenticated(&self) -> StoreResult<bool> {
        self.session.is_authenticated()
    }
}
