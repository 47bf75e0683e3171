//! Stores running against a SQLite file, across reopen

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use folio_core::{
    AuthContext, BlogStore, Corruption, Error, ErrorKind, SqliteStorage, Storage, ThemePreference,
    Theme, VisitCounter,
};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Arc<SqliteStorage> {
    Arc::new(SqliteStorage::open(dir.path().join("folio.db")).unwrap())
}

#[test]
fn test_register_login_across_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let auth = AuthContext::load(open(&dir)).unwrap();
        auth.register(" ada ", " secret ", " ada@example.com ").unwrap();
        auth.login("ada", "secret").unwrap();
    }

    let auth = AuthContext::load(open(&dir)).unwrap();
    let current = auth.current_user().unwrap().expect("session restored");
    assert_eq!(current.username, "ada");
    assert_eq!(current.password, "secret");
    assert_eq!(current.email, "ada@example.com");

    let err = auth.register("ada", "x", "new@example.com").unwrap_err();
    assert!(matches!(err, Error::UsernameTaken));
}

#[test]
fn test_reset_fields_independently() {
    let dir = TempDir::new().unwrap();
    let auth = AuthContext::load(open(&dir)).unwrap();
    auth.register("x", "right", "e@x.com").unwrap();

    let updated = auth.reset_credentials("e@x.com", Some("newname"), None).unwrap();
    assert_eq!((updated.username.as_str(), updated.password.as_str()), ("newname", "right"));

    let updated = auth.reset_credentials("e@x.com", None, Some("newpass")).unwrap();
    assert_eq!((updated.username.as_str(), updated.password.as_str()), ("newname", "newpass"));

    assert_eq!(auth.login("newname", "right").unwrap_err().kind(), ErrorKind::Auth);
    assert!(auth.login("newname", "newpass").is_ok());
}

#[test]
fn test_corrupted_accounts_heal() {
    let dir = TempDir::new().unwrap();
    let storage = open(&dir);
    let auth = AuthContext::load(storage.clone()).unwrap();
    auth.register("ada", "pw", "ada@example.com").unwrap();

    storage.set_item("users", "42").unwrap();

    let loaded = auth.accounts().accounts().unwrap();
    assert!(loaded.value.is_empty());
    assert_eq!(loaded.recovered, Some(Corruption::NotAList));

    // A second read is clean
    assert!(auth.accounts().accounts().unwrap().recovered.is_none());
}

#[test]
fn test_recent_posts_over_reopen() {
    let dir = TempDir::new().unwrap();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    {
        let blog = BlogStore::new(open(&dir));
        for day in [3, 1, 5, 2, 4] {
            blog.publish_at(&format!("day {day}"), "body", None, start + Duration::days(day))
                .unwrap();
        }
    }

    let blog = BlogStore::new(open(&dir));
    let recent = blog.list_recent(3).unwrap();
    let titles: Vec<_> = recent.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["day 5", "day 4", "day 3"]);
    assert!(recent.windows(2).all(|w| w[0].date > w[1].date));
}

#[test]
fn test_visits_and_theme_persist() {
    let dir = TempDir::new().unwrap();

    {
        let storage = open(&dir);
        VisitCounter::new(storage.clone()).record("/").unwrap();
        ThemePreference::new(storage).toggle().unwrap();
    }

    let storage = open(&dir);
    assert_eq!(VisitCounter::new(storage.clone()).record("/").unwrap(), 2);
    assert_eq!(ThemePreference::new(storage).load().unwrap(), Theme::Light);
}
