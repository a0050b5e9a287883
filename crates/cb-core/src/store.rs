//! # Post Store
//!
//! Posts partitioned by board, plus the bookmark index.
//!
//! The bookmark index only holds post ids. Reads resolve them against the
//! board lists, so a bookmarked post always shows its current reactions and
//! there is no second copy to keep in step.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{BoardId, Post, PostDraft, ReactionKind, Report, SharePayload};
use crate::traits::{Clock, ReportSink, ShareSurface, SystemClock};

pub struct PostStore {
    /// Newest first within each board. Iteration follows `BoardId` order.
    boards: BTreeMap<BoardId, Vec<Post>>,
    /// Bookmarked post ids in the order they were bookmarked
    bookmarks: Vec<String>,
    clock: Arc<dyn Clock>,
    last_created_ms: Option<i64>,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            boards: BoardId::ALL.into_iter().map(|b| (b, Vec::new())).collect(),
            bookmarks: Vec::new(),
            clock,
            last_created_ms: None,
        }
    }

    pub fn posts(&self, board: BoardId) -> &[Post] {
        self.boards.get(&board).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.boards.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scans every board in `BoardId` order.
    fn locate(&self, post_id: &str) -> Option<(BoardId, usize)> {
        self.boards.iter().find_map(|(board, posts)| {
            posts
                .iter()
                .position(|p| p.id == post_id)
                .map(|index| (*board, index))
        })
    }

    pub fn get(&self, post_id: &str) -> Option<&Post> {
        let (board, index) = self.locate(post_id)?;
        self.boards.get(&board).and_then(|posts| posts.get(index))
    }

    fn get_mut(&mut self, post_id: &str) -> Result<&mut Post> {
        let (board, index) = self
            .locate(post_id)
            .ok_or_else(|| AppError::post_not_found(post_id))?;
        self.boards
            .get_mut(&board)
            .and_then(|posts| posts.get_mut(index))
            .ok_or_else(|| AppError::post_not_found(post_id))
    }

    /// Bookmarked posts, resolved to their live board copies.
    pub fn bookmarks(&self) -> Vec<&Post> {
        self.bookmarks.iter().filter_map(|id| self.get(id)).collect()
    }

    pub fn is_bookmarked(&self, post_id: &str) -> bool {
        self.bookmarks.iter().any(|id| id == post_id)
    }

    /// Creation times strictly increase per store, so `"<board>-<millis>"`
    /// never repeats even for two posts inside the same millisecond.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = self.clock.now();
        let now_ms = now.timestamp_millis();
        let created_at = match self.last_created_ms {
            Some(last) if now_ms <= last => now + Duration::milliseconds(last + 1 - now_ms),
            _ => now,
        };
        self.last_created_ms = Some(created_at.timestamp_millis());
        created_at
    }

    /// Prepends a new post to `board`. Empty titles and bodies are accepted.
    pub fn submit_post(&mut self, board: BoardId, draft: PostDraft) -> &Post {
        let created_at = self.next_created_at();
        let post = Post::compose(board, created_at, draft);
        debug!(post_id = %post.id, %board, "post submitted");

        let posts = self.boards.entry(board).or_default();
        posts.insert(0, post);
        &posts[0]
    }

    /// Adds one to the named counter and returns its new value.
    pub fn react(&mut self, post_id: &str, kind: ReactionKind) -> Result<u64> {
        let post = self.get_mut(post_id).inspect_err(|_| {
            debug!(post_id, ?kind, "reaction on unknown post ignored");
        })?;
        post.reactions.bump(kind);
        Ok(post.reactions.get(kind))
    }

    /// Flips the bookmark flag and mirrors it into the index. Returns the new
    /// flag.
    pub fn toggle_bookmark(&mut self, post_id: &str) -> Result<bool> {
        let post = self.get_mut(post_id).inspect_err(|_| {
            debug!(post_id, "bookmark toggle on unknown post ignored");
        })?;
        post.is_bookmarked = !post.is_bookmarked;
        let bookmarked = post.is_bookmarked;

        if bookmarked {
            self.bookmarks.push(post_id.to_string());
        } else {
            self.bookmarks.retain(|id| id != post_id);
        }
        debug!(post_id, bookmarked, "bookmark toggled");
        Ok(bookmarked)
    }

    /// Removes the post from its board and from the bookmark index.
    pub fn delete_post(&mut self, post_id: &str) -> Result<Post> {
        let Some((board, index)) = self.locate(post_id) else {
            debug!(post_id, "delete of unknown post ignored");
            return Err(AppError::post_not_found(post_id));
        };
        let removed = self
            .boards
            .get_mut(&board)
            .map(|posts| posts.remove(index))
            .ok_or_else(|| AppError::post_not_found(post_id))?;
        self.bookmarks.retain(|id| id != post_id);
        debug!(post_id, %board, "post deleted");
        Ok(removed)
    }

    /// Hands the post to a share surface. No state changes.
    pub fn share(&self, post_id: &str, url: &str, surface: &dyn ShareSurface) -> Result<()> {
        let post = self
            .get(post_id)
            .ok_or_else(|| AppError::post_not_found(post_id))?;
        surface
            .share(&SharePayload::for_post(post, url))
            .map_err(|e| AppError::Surface(e.to_string()))
    }

    /// Forwards a report. Reports are passed on whether or not the post still
    /// exists.
    pub fn report(&self, post_id: &str, reason: &str, sink: &dyn ReportSink) -> Result<()> {
        let report = Report {
            post_id: post_id.to_string(),
            reason: reason.to_string(),
            reported_at: self.clock.now(),
        };
        sink.report(&report)
            .map_err(|e| AppError::Surface(e.to_string()))
    }

    /// True when ids are unique store-wide and the bookmark index matches the
    /// per-post flags one to one.
    pub fn is_consistent(&self) -> bool {
        let mut ids = HashSet::new();
        let mut flagged = HashSet::new();
        for post in self.boards.values().flatten() {
            if !ids.insert(post.id.as_str()) {
                return false;
            }
            if post.is_bookmarked {
                flagged.insert(post.id.as_str());
            }
        }
        let indexed: HashSet<&str> = self.bookmarks.iter().map(String::as_str).collect();
        indexed.len() == self.bookmarks.len() && indexed == flagged
    }
}
