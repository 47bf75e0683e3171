//! Shared application state

use folio_core::{AuthContext, BlogStore, Storage, StoreResult, ThemePreference, VisitCounter};

use crate::relay::ContactRelay;

/// Everything the handlers need, built once over a single storage handle
pub struct AppState<S, R> {
    /// Accounts, plus one session per client keyed by its session cookie
    pub auth: AuthContext<S>,
    pub blog: BlogStore<S>,
    pub visits: VisitCounter<S>,
    pub theme: ThemePreference<S>,
    pub relay: R,
}

impl<S, R> AppState<S, R>
where
    S: Storage + Clone,
    R: ContactRelay,
{
    /// Build the stores over `storage`, restoring any persisted session
    pub fn new(storage: S, relay: R) -> StoreResult<Self> {
        Ok(Self {
            auth: AuthContext::load(storage.clone())?,
            blog: BlogStore::new(storage.clone()),
            visits: VisitCounter::new(storage.clone()),
            theme: ThemePreference::new(storage),
            relay,
        })
    }
}
