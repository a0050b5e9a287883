//! # Session Controller
//!
//! Owns the authentication stage machine and, once authenticated, the view
//! routing between screens.
//!
//! ```text
//! loading ──► login ◄──► registration
//!               │             │
//!               └──► authenticated ◄┘      (logout returns to login)
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::models::{BoardId, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStage {
    Loading,
    Login,
    Registration,
    Authenticated,
}

/// Which screen the authenticated user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Board,
    Bookmarks,
    Matching,
    Messages,
    Profile,
    Counselling,
    Cart,
}

impl FromStr for View {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "home" => Ok(Self::Home),
            "board" => Ok(Self::Board),
            "bookmarks" => Ok(Self::Bookmarks),
            "matching" => Ok(Self::Matching),
            "messages" => Ok(Self::Messages),
            "profile" => Ok(Self::Profile),
            "counselling" => Ok(Self::Counselling),
            "cart" => Ok(Self::Cart),
            other => Err(AppError::ValidationError(format!("unknown view '{other}'"))),
        }
    }
}

/// Exactly one of these is rendered at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "board", rename_all = "snake_case")]
pub enum Screen {
    Loading,
    Login,
    Registration,
    Home,
    Board(BoardId),
    Bookmarks,
    Matching,
    Messages,
    Profile,
    CounsellingCart,
}

#[derive(Debug, Clone)]
pub struct SessionController {
    stage: AuthStage,
    view: View,
    user: Option<User>,
    active_board: Option<BoardId>,
    /// Post shown in the detail overlay, by id
    selected_post: Option<String>,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            stage: AuthStage::Loading,
            view: View::Home,
            user: None,
            active_board: None,
            selected_post: None,
        }
    }

    pub fn stage(&self) -> AuthStage {
        self.stage
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn active_board(&self) -> Option<BoardId> {
        self.active_board
    }

    pub fn selected_post(&self) -> Option<&str> {
        self.selected_post.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.stage == AuthStage::Authenticated
    }

    fn expect_stage(&self, expected: AuthStage, action: &'static str) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            debug!(stage = ?self.stage, action, "rejected auth transition");
            Err(AppError::InvalidTransition {
                stage: self.stage,
                action,
            })
        }
    }

    /// The loading screen finished.
    pub fn complete_loading(&mut self) -> Result<()> {
        self.expect_stage(AuthStage::Loading, "complete loading")?;
        self.stage = AuthStage::Login;
        Ok(())
    }

    pub fn go_to_registration(&mut self) -> Result<()> {
        self.expect_stage(AuthStage::Login, "open registration")?;
        self.stage = AuthStage::Registration;
        Ok(())
    }

    pub fn back_to_login(&mut self) -> Result<()> {
        self.expect_stage(AuthStage::Registration, "go back to login")?;
        self.stage = AuthStage::Login;
        Ok(())
    }

    /// Credentials are not checked; whatever the login screen hands over is
    /// committed as the session user.
    pub fn login(&mut self, user: User) -> Result<()> {
        self.expect_stage(AuthStage::Login, "log in")?;
        self.authenticate(user);
        Ok(())
    }

    pub fn register(&mut self, user: User) -> Result<()> {
        self.expect_stage(AuthStage::Registration, "register")?;
        self.authenticate(user);
        Ok(())
    }

    fn authenticate(&mut self, user: User) {
        info!(user = %user.name, gender = user.gender.as_str(), "session user committed");
        self.user = Some(user);
        self.stage = AuthStage::Authenticated;
        self.view = View::Home;
        self.active_board = None;
        self.selected_post = None;
    }

    /// Drops the user and returns to the login screen.
    pub fn logout(&mut self) -> Result<()> {
        self.expect_stage(AuthStage::Authenticated, "log out")?;
        if let Some(user) = self.user.take() {
            info!(user = %user.name, "session user logged out");
        }
        self.stage = AuthStage::Login;
        self.view = View::Home;
        self.active_board = None;
        self.selected_post = None;
        Ok(())
    }

    /// Switches to any view except a board that was never entered. `Board`
    /// re-enters the active board.
    pub fn navigate_to_app(&mut self, view: View) -> Result<()> {
        self.expect_stage(AuthStage::Authenticated, "navigate")?;
        if view == View::Board && self.active_board.is_none() {
            return Err(AppError::ValidationError(
                "no board has been entered yet".to_string(),
            ));
        }
        self.view = view;
        self.selected_post = None;
        Ok(())
    }

    pub fn back_to_home(&mut self) -> Result<()> {
        self.navigate_to_app(View::Home)
    }

    /// Opens `board` if the session user may see it. A gendered board the user
    /// is not admitted to leaves every piece of state as it was.
    pub fn navigate_to_board(&mut self, board: BoardId) -> Result<()> {
        self.expect_stage(AuthStage::Authenticated, "open a board")?;
        let gender = self.user.as_ref().map(|u| u.gender).unwrap_or_default();
        if !board.admits(gender) {
            debug!(%board, gender = gender.as_str(), "board navigation rejected");
            return Err(AppError::Unauthorized(format!(
                "board '{board}' is not open to {} users",
                gender.as_str()
            )));
        }
        self.active_board = Some(board);
        self.view = View::Board;
        self.selected_post = None;
        Ok(())
    }

    pub fn select_post(&mut self, post_id: impl Into<String>) -> Result<()> {
        self.expect_stage(AuthStage::Authenticated, "open a post")?;
        self.selected_post = Some(post_id.into());
        Ok(())
    }

    pub fn clear_selected_post(&mut self) {
        self.selected_post = None;
    }

    /// Clears the selection only if it points at `post_id`.
    pub(crate) fn forget_post(&mut self, post_id: &str) {
        if self.selected_post.as_deref() == Some(post_id) {
            self.selected_post = None;
        }
    }

    pub fn screen(&self) -> Screen {
        match self.stage {
            AuthStage::Loading => Screen::Loading,
            AuthStage::Login => Screen::Login,
            AuthStage::Registration => Screen::Registration,
            AuthStage::Authenticated => match self.view {
                View::Home => Screen::Home,
                View::Board => match self.active_board {
                    Some(board) => Screen::Board(board),
                    None => Screen::Home,
                },
                View::Bookmarks => Screen::Bookmarks,
                View::Matching => Screen::Matching,
                View::Messages => Screen::Messages,
                View::Profile => Screen::Profile,
                View::Counselling | View::Cart => Screen::CounsellingCart,
            },
        }
    }
}
