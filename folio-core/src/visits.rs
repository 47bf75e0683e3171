//! Per-path page visit counters

use std::sync::Mutex;

use crate::storage::{lock_writes, Storage, StoreResult, VISITS_KEY_PREFIX};

fn visits_key(path: &str) -> String {
    format!("{VISITS_KEY_PREFIX}{path}")
}

/// Parse a stored count the way `parseInt` reads it: optional sign, then the
/// leading decimal digits. No digits reads as 0; overflow saturates.
fn parse_count(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let magnitude = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });

    if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    }
}

pub struct VisitCounter<S> {
    storage: S,
    write_lock: Mutex<()>,
}

impl<S: Storage> VisitCounter<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Current count for `path` without recording a visit
    pub fn count(&self, path: &str) -> StoreResult<i64> {
        Ok(self
            .storage
            .get_item(&visits_key(path))?
            .map(|raw| parse_count(&raw))
            .unwrap_or(0))
    }

    /// Record one visit to `path` and return the new count
    pub fn record(&self, path: &str) -> StoreResult<i64> {
        let _guard = lock_writes(&self.write_lock)?;
        let visits = self.count(path)?.saturating_add(1);
        self.storage
            .set_item(&visits_key(path), &visits.to_string())?;
        tracing::debug!(path, visits, "Visit recorded");
        Ok(visits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::storage::InMemoryStorage;

    #[test]
    fn test_record_increments_per_path() {
        let counter = VisitCounter::new(InMemoryStorage::new());
        assert_eq!(counter.record("/").unwrap(), 1);
        assert_eq!(counter.record("/").unwrap(), 2);
        assert_eq!(counter.record("/blog").unwrap(), 1);
        assert_eq!(counter.count("/").unwrap(), 2);
        assert_eq!(counter.count("/missing").unwrap(), 0);
    }

    #[test]
    fn test_garbage_counts_as_zero() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.set_item("page_visits_/", "lots").unwrap();
        let counter = VisitCounter::new(storage.clone());

        assert_eq!(counter.record("/").unwrap(), 1);
        assert_eq!(storage.get_item("page_visits_/").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_leading_digits_are_kept() {
        assert_eq!(parse_count("12abc"), 12);
        assert_eq!(parse_count(" 7"), 7);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn test_signed_and_oversized_counts() {
        assert_eq!(parse_count("-3"), -3);
        assert_eq!(parse_count("+4"), 4);
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count("99999999999999999999999"), i64::MAX);

        let storage = Arc::new(InMemoryStorage::new());
        storage.set_item("page_visits_/", "-3").unwrap();
        let counter = VisitCounter::new(storage);
        assert_eq!(counter.record("/").unwrap(), -2);
    }
}
