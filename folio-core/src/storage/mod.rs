//! Key-value persistence for Folio
//!
//! Every store in this crate keeps its state as a string value under a fixed
//! key, the same layout a browser's local storage would hold. Lists are JSON
//! arrays that are read whole, mutated and written back whole.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryStorage;
pub use sqlite::SqliteStorage;

use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, Error>;

/// Key holding the account list
pub const USERS_KEY: &str = "users";
/// Key holding the persisted session mirror
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Key holding the blog post list
pub const BLOG_POSTS_KEY: &str = "blogPosts";
/// Key holding the theme preference
pub const THEME_KEY: &str = "themeMode";
/// Key holding the session mirror of one client
pub fn client_session_key(client_id: &str) -> String {
    format!("{CURRENT_USER_KEY}_{client_id}")
}

/// Prefix of the per-path visit counter keys
pub const VISITS_KEY_PREFIX: &str = "page_visits_";

/// Trait for string key-value storage
pub trait Storage: Send + Sync {
    /// Get the value stored under a key
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store a value under a key, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

/// Why a stored list had to be discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    /// The value was not valid JSON
    Malformed,
    /// The value was JSON but not an array
    NotAList,
}

/// A value read from storage, plus whether it was recovered from corruption
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    /// Set when the stored value was unreadable and has been reset to empty
    pub recovered: Option<Corruption>,
    /// Array elements that did not fit the record shape, kept verbatim
    pub skipped: Vec<Value>,
}

impl<T> Loaded<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            recovered: None,
            skipped: Vec::new(),
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Read a JSON list stored under `key`.
///
/// A missing key reads as an empty list. A value that is not JSON, or not an
/// array, is overwritten with `[]` and reported through
/// [`Loaded::recovered`]. Inside an array, elements that do not decode are
/// left out of the result and handed back in [`Loaded::skipped`]; storage is
/// not touched for those.
pub fn read_list<T, S>(storage: &S, key: &str) -> StoreResult<Loaded<Vec<T>>>
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    let Some(raw) = storage.get_item(key)? else {
        return Ok(Loaded::clean(Vec::new()));
    };

    let corruption = match serde_json::from_str::<Value>(&raw) {
        Err(_) => Corruption::Malformed,
        Ok(Value::Array(elements)) => return Ok(decode_elements(key, elements)),
        Ok(_) => Corruption::NotAList,
    };

    tracing::warn!(key, ?corruption, "Stored list unreadable, resetting to empty");
    storage.set_item(key, "[]")?;

    Ok(Loaded {
        value: Vec::new(),
        recovered: Some(corruption),
        skipped: Vec::new(),
    })
}

fn decode_elements<T: DeserializeOwned>(key: &str, elements: Vec<Value>) -> Loaded<Vec<T>> {
    let mut loaded = Loaded::clean(Vec::with_capacity(elements.len()));
    for (index, element) in elements.into_iter().enumerate() {
        let decoded: Result<T, _> = Deserialize::deserialize(&element);
        match decoded {
            Ok(item) => loaded.value.push(item),
            Err(err) => {
                tracing::warn!(key, index, error = %err, "Skipping unreadable record");
                loaded.skipped.push(element);
            }
        }
    }
    loaded
}

/// Serialize a list and store it under `key`
pub fn write_list<T, S>(storage: &S, key: &str, items: &[T]) -> StoreResult<()>
where
    T: Serialize,
    S: Storage + ?Sized,
{
    let json = serde_json::to_string(items)?;
    storage.set_item(key, &json)
}

/// Store a list read with [`read_list`] back under `key`.
///
/// Skipped elements are appended unchanged so a mutation never drops them.
pub fn write_back<T, S>(storage: &S, key: &str, loaded: &Loaded<Vec<T>>) -> StoreResult<()>
where
    T: Serialize,
    S: Storage + ?Sized,
{
    if loaded.skipped.is_empty() {
        return write_list(storage, key, &loaded.value);
    }

    let mut elements = Vec::with_capacity(loaded.value.len() + loaded.skipped.len());
    for item in &loaded.value {
        elements.push(serde_json::to_value(item)?);
    }
    elements.extend(loaded.skipped.iter().cloned());
    write_list(storage, key, &elements)
}

/// Serialize read-modify-write cycles of one store within this process
pub(crate) fn lock_writes(lock: &Mutex<()>) -> StoreResult<MutexGuard<'_, ()>> {
    lock.lock()
        .map_err(|_| Error::Storage("write lock poisoned".to_string()))
}
