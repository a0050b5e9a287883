//! # Community
//!
//! The handle a presentation layer threads through its screens. It pairs the
//! session controller with the post store of the current session: the store is
//! created when a user logs in or registers and dropped again on logout.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::CommunityConfig;
use crate::error::{AppError, Result};
use crate::models::{BoardId, Post, PostDraft, ReactionKind, User};
use crate::session::{AuthStage, Screen, SessionController, View};
use crate::store::PostStore;
use crate::traits::{Clock, ReportSink, ShareSurface, SystemClock};

pub struct Community {
    config: CommunityConfig,
    clock: Arc<dyn Clock>,
    session: SessionController,
    store: Option<PostStore>,
    session_id: Option<Uuid>,
}

impl Community {
    pub fn new(config: CommunityConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: CommunityConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            session: SessionController::new(),
            store: None,
            session_id: None,
        }
    }

    pub fn config(&self) -> &CommunityConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    /// Set while a user is signed in; tags that session's log events.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn store(&self) -> Result<&PostStore> {
        self.store.as_ref().ok_or(AppError::InvalidTransition {
            stage: self.session.stage(),
            action: "read posts",
        })
    }

    fn store_mut(&mut self, action: &'static str) -> Result<&mut PostStore> {
        let stage = self.session.stage();
        self.store
            .as_mut()
            .ok_or(AppError::InvalidTransition { stage, action })
    }

    // ── Auth ────────────────────────────────────────────────────────────────

    pub fn complete_loading(&mut self) -> Result<()> {
        self.session.complete_loading()
    }

    pub fn go_to_registration(&mut self) -> Result<()> {
        self.session.go_to_registration()
    }

    pub fn back_to_login(&mut self) -> Result<()> {
        self.session.back_to_login()
    }

    pub fn login(&mut self, user: User) -> Result<()> {
        self.session.login(user)?;
        self.start_session();
        Ok(())
    }

    pub fn register(&mut self, user: User) -> Result<()> {
        self.session.register(user)?;
        self.start_session();
        Ok(())
    }

    fn start_session(&mut self) {
        let session_id = Uuid::now_v7();
        info!(%session_id, "session started");
        self.session_id = Some(session_id);
        self.store = Some(PostStore::with_clock(Arc::clone(&self.clock)));
    }

    /// Ends the session. Every post of the session goes with it.
    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()?;
        if let Some(session_id) = self.session_id.take() {
            let posts = self.store.as_ref().map(PostStore::len).unwrap_or_default();
            info!(%session_id, posts, "session torn down");
        }
        self.store = None;
        Ok(())
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    pub fn navigate_to_app(&mut self, view: View) -> Result<()> {
        self.session.navigate_to_app(view)
    }

    pub fn back_to_home(&mut self) -> Result<()> {
        self.session.back_to_home()
    }

    pub fn navigate_to_board(&mut self, board: BoardId) -> Result<()> {
        self.session.navigate_to_board(board)
    }

    /// Opens the detail overlay for a post that exists.
    pub fn select_post(&mut self, post_id: &str) -> Result<()> {
        if self.store()?.get(post_id).is_none() {
            return Err(AppError::post_not_found(post_id));
        }
        self.session.select_post(post_id)
    }

    pub fn clear_selected_post(&mut self) {
        self.session.clear_selected_post();
    }

    pub fn selected_post(&self) -> Option<&Post> {
        let id = self.session.selected_post()?;
        self.store.as_ref()?.get(id)
    }

    // ── Posts ───────────────────────────────────────────────────────────────

    /// Posts of the board currently open, newest first.
    pub fn board_posts(&self) -> Result<&[Post]> {
        let board = self.active_board()?;
        Ok(self.store()?.posts(board))
    }

    pub fn bookmarks(&self) -> Result<Vec<&Post>> {
        Ok(self.store()?.bookmarks())
    }

    fn active_board(&self) -> Result<BoardId> {
        self.session
            .active_board()
            .ok_or_else(|| AppError::ValidationError("no board is open".to_string()))
    }

    /// Posts into the board currently open.
    pub fn submit_post(&mut self, draft: PostDraft) -> Result<&Post> {
        let board = self.active_board()?;
        Ok(self.store_mut("submit a post")?.submit_post(board, draft))
    }

    pub fn react(&mut self, post_id: &str, kind: ReactionKind) -> Result<u64> {
        self.store_mut("react")?.react(post_id, kind)
    }

    pub fn toggle_bookmark(&mut self, post_id: &str) -> Result<bool> {
        self.store_mut("bookmark")?.toggle_bookmark(post_id)
    }

    /// Deletes the post everywhere, closing its detail overlay if open.
    pub fn delete_post(&mut self, post_id: &str) -> Result<Post> {
        let removed = self.store_mut("delete a post")?.delete_post(post_id)?;
        self.session.forget_post(post_id);
        Ok(removed)
    }

    pub fn share(&self, post_id: &str, surface: &dyn ShareSurface) -> Result<()> {
        self.store()?
            .share(post_id, &self.config.share_url, surface)
    }

    pub fn report(&self, post_id: &str, reason: &str, sink: &dyn ReportSink) -> Result<()> {
        debug!(post_id, reason, "post reported");
        self.store()?.report(post_id, reason, sink)
    }

    pub fn stage(&self) -> AuthStage {
        self.session.stage()
    }
}
