//! community-board/crates/cb-core/src/lib.rs
//!
//! The central state and navigation logic for the community board: the
//! session/auth controller, the board-partitioned post store, and the port
//! traits for the share and report surfaces.

pub mod community;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod store;
pub mod traits;

// Re-exporting for easier access in other crates
pub use community::*;
pub use config::*;
pub use error::*;
pub use models::*;
pub use session::*;
pub use store::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_post_id_carries_board_and_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let post = Post::compose(BoardId::Mens, at, PostDraft::new("Hello", "Rust!"));
        assert_eq!(post.id, "mens-1700000000123");
        assert_eq!(post.board, BoardId::Mens);
        assert_eq!(post.author, "Anonymous");
    }

    #[test]
    fn test_board_names_round_trip() {
        for board in BoardId::ALL {
            assert_eq!(board.as_str().parse::<BoardId>().unwrap(), board);
        }
        assert!("memes".parse::<BoardId>().is_err());
    }

    #[test]
    fn test_only_gendered_boards_restrict() {
        let restricted: Vec<_> = BoardId::ALL.into_iter().filter(|b| b.is_restricted()).collect();
        assert_eq!(restricted, vec![BoardId::Mens, BoardId::Womens]);
        assert!(BoardId::Mens.admits(Gender::Male));
        assert!(!BoardId::Mens.admits(Gender::Female));
        assert!(BoardId::Womens.admits(Gender::Female));
        assert!(BoardId::Batch.admits(Gender::Unspecified));
    }

    #[test]
    fn test_gender_parse_is_lenient() {
        assert_eq!(Gender::parse_lenient("Female"), Gender::Female);
        assert_eq!(Gender::parse_lenient(" male "), Gender::Male);
        assert_eq!(Gender::parse_lenient(""), Gender::Unspecified);
        assert_eq!(Gender::parse_lenient("other"), Gender::Unspecified);
    }

    #[test]
    fn test_reaction_names() {
        assert_eq!("thumbsUp".parse::<ReactionKind>().unwrap(), ReactionKind::ThumbsUp);
        assert_eq!("down".parse::<ReactionKind>().unwrap(), ReactionKind::ThumbsDown);
        assert!("clap".parse::<ReactionKind>().is_err());
    }

    #[test]
    fn test_post_serializes_with_camel_case_fields() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let post = Post::compose(BoardId::Batch, at, PostDraft::new("t", "c"));
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["isBookmarked"], false);
        assert_eq!(json["reactions"]["thumbsUp"], 0);
        assert_eq!(json["board"], "batch");
        assert_eq!(json["batch"], "N/A");
    }

    #[test]
    fn test_clipboard_text_layout() {
        let payload = SharePayload {
            title: "Hi".into(),
            text: "Hello".into(),
            url: "http://localhost/".into(),
        };
        assert_eq!(payload.to_clipboard_text(), "Hi\nHello\nhttp://localhost/");
    }
}
