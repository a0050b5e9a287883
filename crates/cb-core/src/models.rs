//! # Domain Models
//!
//! These structs represent the core entities of the community board.
//! Posts are identified by `"<board>-<creation millis>"` strings so that an id
//! alone is enough to find a post without knowing its board.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Gender attribute of the session user. Only used to gate the gendered boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    /// Lenient parse: anything that is not `male` or `female` is unspecified.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unspecified => "unspecified",
        }
    }
}

/// The identity committed by login or registration. Lives for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub gender: Gender,
    /// Opaque avatar reference (an emoji in the stock login screen)
    pub avatar: String,
}

impl User {
    pub fn new(name: impl Into<String>, gender: Gender, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender,
            avatar: avatar.into(),
        }
    }
}

/// The closed set of boards. Declaration order is the scan order used by
/// every id lookup, so keep it stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardId {
    Announcements,
    Batch,
    Anonymous,
    Mens,
    Womens,
}

impl BoardId {
    pub const ALL: [BoardId; 5] = [
        BoardId::Announcements,
        BoardId::Batch,
        BoardId::Anonymous,
        BoardId::Mens,
        BoardId::Womens,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Announcements => "announcements",
            Self::Batch => "batch",
            Self::Anonymous => "anonymous",
            Self::Mens => "mens",
            Self::Womens => "womens",
        }
    }

    /// Gendered boards only admit users of the matching gender.
    pub fn is_restricted(self) -> bool {
        matches!(self, Self::Mens | Self::Womens)
    }

    pub fn admits(self, gender: Gender) -> bool {
        match self {
            Self::Mens => gender == Gender::Male,
            Self::Womens => gender == Gender::Female,
            _ => true,
        }
    }

    /// Display name of whoever posts here.
    pub fn author(self) -> &'static str {
        match self {
            Self::Announcements => "Admin",
            _ => "Anonymous",
        }
    }

    pub fn author_avatar(self) -> &'static str {
        match self {
            Self::Announcements => "📢",
            _ => "👤",
        }
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardId::ALL
            .into_iter()
            .find(|board| board.as_str() == s.trim())
            .ok_or_else(|| AppError::ValidationError(format!("unknown board '{s}'")))
    }
}

/// The three reaction counters a post carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReactionKind {
    ThumbsUp,
    ThumbsDown,
    Heart,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 3] = [Self::ThumbsUp, Self::ThumbsDown, Self::Heart];
}

impl FromStr for ReactionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "thumbsUp" | "thumbs_up" | "up" => Ok(Self::ThumbsUp),
            "thumbsDown" | "thumbs_down" | "down" => Ok(Self::ThumbsDown),
            "heart" => Ok(Self::Heart),
            other => Err(AppError::ValidationError(format!(
                "unknown reaction '{other}'"
            ))),
        }
    }
}

/// Monotonic reaction counters. There is no un-react.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reactions {
    pub thumbs_up: u64,
    pub thumbs_down: u64,
    pub heart: u64,
}

impl Reactions {
    pub fn get(&self, kind: ReactionKind) -> u64 {
        match kind {
            ReactionKind::ThumbsUp => self.thumbs_up,
            ReactionKind::ThumbsDown => self.thumbs_down,
            ReactionKind::Heart => self.heart,
        }
    }

    /// Increments exactly one counter by one.
    pub fn bump(&mut self, kind: ReactionKind) {
        let counter = match kind {
            ReactionKind::ThumbsUp => &mut self.thumbs_up,
            ReactionKind::ThumbsDown => &mut self.thumbs_down,
            ReactionKind::Heart => &mut self.heart,
        };
        *counter = counter.saturating_add(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub content: String,
    pub timestamp: String,
}

/// The fundamental unit of conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub board: BoardId,
    pub author: String,
    pub avatar: String,
    pub title: String,
    pub content: String,
    /// Human-readable creation time, fixed at creation
    pub timestamp: String,
    pub created_at: DateTime<Utc>,
    pub reactions: Reactions,
    pub comments: Vec<Comment>,
    /// Opaque image references supplied by the composer
    pub images: Vec<String>,
    pub is_bookmarked: bool,
    pub batch: String,
}

/// Fields the composer supplies when submitting a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub batch: Option<String>,
    pub images: Vec<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }
}

pub const NO_BATCH: &str = "N/A";

impl Post {
    /// Builds a fresh post for `board`. Author and avatar come from the board,
    /// never from the draft.
    pub fn compose(board: BoardId, created_at: DateTime<Utc>, draft: PostDraft) -> Self {
        let batch = draft
            .batch
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| NO_BATCH.to_string());

        Self {
            id: format!("{}-{}", board.as_str(), created_at.timestamp_millis()),
            board,
            author: board.author().to_string(),
            avatar: board.author_avatar().to_string(),
            title: draft.title,
            content: draft.content,
            timestamp: display_timestamp(created_at),
            created_at,
            reactions: Reactions::default(),
            comments: Vec::new(),
            images: draft.images,
            is_bookmarked: false,
            batch,
        }
    }
}

/// Locale-style rendering, e.g. `3/14/2026, 9:05:00 PM`.
pub fn display_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// What gets handed to a share surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_post(post: &Post, url: impl Into<String>) -> Self {
        Self {
            title: post.title.clone(),
            text: post.content.clone(),
            url: url.into(),
        }
    }

    /// Plain-text form used when only a clipboard is available.
    pub fn to_clipboard_text(&self) -> String {
        format!("{}\n{}\n{}", self.title, self.text, self.url)
    }
}

/// A user report against a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub post_id: String,
    pub reason: String,
    pub reported_at: DateTime<Utc>,
}
