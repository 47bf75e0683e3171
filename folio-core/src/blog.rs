//! Blog post publishing, listing and deletion

use std::cmp::Reverse;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::models::{Account, BlogPost, ANONYMOUS_AUTHOR};
use crate::storage::{
    lock_writes, read_list, write_back, Loaded, Storage, StoreResult, BLOG_POSTS_KEY,
};

/// Number of posts shown on the blog page
pub const DEFAULT_RECENT_POSTS: usize = 3;

/// Blog posts persisted as one list under [`BLOG_POSTS_KEY`], in insertion order
pub struct BlogStore<S> {
    storage: S,
    write_lock: Mutex<()>,
}

impl<S: Storage> BlogStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Load every post in storage order
    pub fn posts(&self) -> StoreResult<Loaded<Vec<BlogPost>>> {
        read_list(&self.storage, BLOG_POSTS_KEY)
    }

    /// Publish a post now
    pub fn publish(
        &self,
        title: &str,
        content: &str,
        author: Option<&Account>,
    ) -> StoreResult<BlogPost> {
        self.publish_at(title, content, author, Utc::now())
    }

    /// Publish a post dated `now`.
    ///
    /// The id is the millisecond timestamp, moved past the largest stored id
    /// when two posts land in the same millisecond.
    pub fn publish_at(
        &self,
        title: &str,
        content: &str,
        author: Option<&Account>,
        now: DateTime<Utc>,
    ) -> StoreResult<BlogPost> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(Error::Validation("Title and content are required"));
        }

        let _guard = lock_writes(&self.write_lock)?;
        let mut loaded = self.posts()?;
        let posts = &mut loaded.value;

        let mut id = now.timestamp_millis();
        if let Some(max) = posts.iter().map(|p| p.id).max() {
            if id <= max {
                id = max + 1;
            }
        }

        let post = BlogPost {
            id,
            title: title.to_string(),
            content: content.to_string(),
            date: now,
            author: author
                .map(|a| a.username.clone())
                .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
        };
        posts.push(post.clone());
        write_back(&self.storage, BLOG_POSTS_KEY, &loaded)?;

        tracing::info!(id = post.id, author = %post.author, "Post published");
        Ok(post)
    }

    /// The `n` newest posts, newest first. Storage order is left untouched.
    pub fn list_recent(&self, n: usize) -> StoreResult<Vec<BlogPost>> {
        let mut posts = self.posts()?.into_inner();
        posts.sort_by_key(|p| Reverse((p.date, p.id)));
        posts.truncate(n);
        Ok(posts)
    }

    /// Remove a post. Only an admin account may delete.
    pub fn delete(&self, id: i64, actor: Option<&Account>) -> StoreResult<BlogPost> {
        if !actor.is_some_and(Account::is_admin) {
            tracing::warn!(id, "Post deletion rejected: not an admin");
            return Err(Error::Forbidden);
        }

        let _guard = lock_writes(&self.write_lock)?;
        let mut loaded = self.posts()?;
        let posts = &mut loaded.value;

        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::PostNotFound)?;
        let removed = posts.remove(index);
        write_back(&self.storage, BLOG_POSTS_KEY, &loaded)?;

        tracing::info!(id, "Post deleted");
        Ok(removed)
    }
}
