use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{Post, PostPage, ReactionKind, ReactionRequest, TargetType};
use crate::services::api::MarketplaceApi;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feed {
    pub pages: Vec<PostPage>,
    pub stale: bool,
}

impl Feed {
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.pages.iter().flat_map(|p| p.posts.iter())
    }
}

#[derive(Debug)]
pub struct PendingToggle {
    pub id: Uuid,
    pub post_id: u64,
    pub kind: ReactionKind,
    pub touched: usize,
    snapshot: HashMap<String, Feed>,
}

#[derive(Debug, Default)]
pub struct ReactionCache {
    feeds: HashMap<String, Feed>,
}

impl ReactionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&self, key: &str) -> Option<&Feed> {
        self.feeds.get(key)
    }

    pub fn post(&self, post_id: u64) -> Option<&Post> {
        self.feeds
            .values()
            .flat_map(Feed::posts)
            .find(|p| p.id == post_id)
    }

    pub fn needs_refetch(&self, key: &str) -> bool {
        self.feeds.get(key).map(|f| f.stale).unwrap_or(true)
    }

    pub fn store_page(&mut self, key: &str, page: PostPage) {
        let feed = self.feeds.entry(key.to_string()).or_default();
        match feed.pages.iter_mut().find(|p| p.page == page.page) {
            Some(existing) => *existing = page,
            None => {
                feed.pages.push(page);
                feed.pages.sort_by_key(|p| p.page);
            }
        }
    }

    pub fn replace_feed(&mut self, key: &str, pages: Vec<PostPage>) {
        self.feeds.insert(
            key.to_string(),
            Feed {
                pages,
                stale: false,
            },
        );
    }

    pub fn begin_toggle(&mut self, post_id: u64, kind: ReactionKind) -> PendingToggle {
        let snapshot = self.feeds.clone();
        let mut touched = 0;
        for feed in self.feeds.values_mut() {
            for post in feed.pages.iter_mut().flat_map(|p| p.posts.iter_mut()) {
                if post.id == post_id {
                    post.toggle(kind);
                    touched += 1;
                }
            }
        }

        PendingToggle {
            id: Uuid::new_v4(),
            post_id,
            kind,
            touched,
            snapshot,
        }
    }

    pub fn rollback(&mut self, pending: PendingToggle) {
        tracing::debug!(
            mutation = %pending.id,
            post_id = pending.post_id,
            "restoring reaction snapshot"
        );
        self.feeds = pending.snapshot;
    }

    pub fn settle(&mut self) {
        for feed in self.feeds.values_mut() {
            feed.stale = true;
        }
    }
}

fn lock(cache: &Mutex<ReactionCache>) -> MutexGuard<'_, ReactionCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Optimistically toggles `kind` on a post, then confirms with the server.
///
/// The cache lock is released while the request is in flight, so other
/// toggles may interleave; each one keeps its own snapshot.
pub async fn toggle_reaction(
    cache: &Mutex<ReactionCache>,
    api: &dyn MarketplaceApi,
    post_id: u64,
    kind: ReactionKind,
    user_id: &str,
) -> Result<(), ApiError> {
    let pending = lock(cache).begin_toggle(post_id, kind);
    tracing::debug!(
        mutation = %pending.id,
        post_id,
        kind = kind.as_str(),
        touched = pending.touched,
        "optimistic reaction applied"
    );

    let request = ReactionRequest {
        target_id: post_id,
        target_type: TargetType::Post,
        reaction_kind: kind,
        user_id: user_id.to_string(),
    };
    let result = api.react(&request).await;

    let mut cache = lock(cache);
    if let Err(e) = &result {
        tracing::warn!(error = %e, post_id, kind = kind.as_str(), "reaction failed, rolling back");
        cache.rollback(pending);
    }
    cache.settle();
    result
}

pub async fn refetch_feed(
    cache: &Mutex<ReactionCache>,
    api: &dyn MarketplaceApi,
    key: &str,
    pages: u32,
) -> Result<(), ApiError> {
    let mut fetched = Vec::new();
    for page in 1..=pages.max(1) {
        let result = api.fetch_posts(key, page).await?;
        let last = result.next_page.is_none();
        fetched.push(result);
        if last {
            break;
        }
    }
    lock(cache).replace_feed(key, fetched);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, loves: u32, loved: bool) -> Post {
        Post {
            id,
            author_id: "author".to_string(),
            content: String::new(),
            loves_count: loves,
            saves_count: 0,
            is_loved: loved,
            is_saved: false,
        }
    }

    fn cache() -> ReactionCache {
        let mut cache = ReactionCache::new();
        cache.replace_feed(
            "home",
            vec![
                PostPage {
                    page: 1,
                    posts: vec![post(5, 10, false), post(6, 2, true)],
                    next_page: Some(2),
                },
                PostPage {
                    page: 2,
                    posts: vec![post(7, 0, false)],
                    next_page: None,
                },
            ],
        );
        cache.replace_feed(
            "profile",
            vec![PostPage {
                page: 1,
                posts: vec![post(5, 10, false)],
                next_page: None,
            }],
        );
        cache
    }

    #[test]
    fn test_begin_toggle_updates_every_copy() {
        let mut cache = cache();
        let pending = cache.begin_toggle(5, ReactionKind::Love);
        assert_eq!(pending.touched, 2);
        for key in ["home", "profile"] {
            let p = cache.feed(key).unwrap().posts().find(|p| p.id == 5).unwrap();
            assert!(p.is_loved);
            assert_eq!(p.loves_count, 11);
        }
    }

    #[test]
    fn test_rollback_restores_snapshot_verbatim() {
        let mut cache = cache();
        let before = cache.feeds.clone();
        let pending = cache.begin_toggle(5, ReactionKind::Save);
        cache.rollback(pending);
        assert_eq!(cache.feeds, before);
    }

    #[test]
    fn test_settle_marks_all_feeds_stale() {
        let mut cache = cache();
        assert!(!cache.needs_refetch("home"));
        cache.settle();
        assert!(cache.needs_refetch("home"));
        assert!(cache.needs_refetch("profile"));
        assert!(cache.needs_refetch("unknown"));
    }

    #[test]
    fn test_store_page_replaces_same_number() {
        let mut cache = cache();
        cache.store_page(
            "home",
            PostPage {
                page: 2,
                posts: vec![post(8, 1, false)],
                next_page: None,
            },
        );
        let feed = cache.feed("home").unwrap();
        assert_eq!(feed.pages.len(), 2);
        assert_eq!(feed.pages[1].posts[0].id, 8);
    }

    #[test]
    fn test_toggle_unknown_post_touches_nothing() {
        let mut cache = cache();
        let pending = cache.begin_toggle(99, ReactionKind::Love);
        assert_eq!(pending.touched, 0);
        assert!(cache.post(99).is_none());
    }
}
