//! Property checks for the post store and board gating.

use std::collections::HashMap;
use std::sync::Arc;

use cb_core::{
    BoardId, Clock, Gender, PostDraft, PostStore, ReactionKind, SessionController, User, View,
};
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

struct FrozenClock(DateTime<Utc>);

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn frozen_store() -> PostStore {
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    PostStore::with_clock(Arc::new(FrozenClock(at)))
}

#[derive(Debug, Clone)]
enum Op {
    Submit(BoardId),
    React(usize, ReactionKind),
    Toggle(usize),
    Delete(usize),
}

fn board() -> impl Strategy<Value = BoardId> {
    prop::sample::select(BoardId::ALL.to_vec())
}

fn reaction() -> impl Strategy<Value = ReactionKind> {
    prop::sample::select(ReactionKind::ALL.to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        board().prop_map(Op::Submit),
        (any::<usize>(), reaction()).prop_map(|(i, k)| Op::React(i, k)),
        any::<usize>().prop_map(Op::Toggle),
        any::<usize>().prop_map(Op::Delete),
    ]
}

proptest! {
    #[test]
    fn random_operations_keep_the_store_consistent(ops in prop::collection::vec(op(), 1..60)) {
        let mut store = frozen_store();
        // Every id ever issued, including deleted ones
        let mut issued: Vec<String> = Vec::new();
        let mut expected: HashMap<(String, ReactionKind), u64> = HashMap::new();

        for op in ops {
            match op {
                Op::Submit(board) => {
                    let post = store.submit_post(board, PostDraft::new("t", "c"));
                    prop_assert!(!issued.contains(&post.id));
                    let id = post.id.clone();
                    prop_assert_eq!(&store.posts(board)[0].id, &id);
                    issued.push(id);
                }
                Op::React(i, kind) if !issued.is_empty() => {
                    let id = issued[i % issued.len()].clone();
                    let exists = store.get(&id).is_some();
                    prop_assert_eq!(store.react(&id, kind).is_ok(), exists);
                    if exists {
                        *expected.entry((id, kind)).or_default() += 1;
                    }
                }
                Op::Toggle(i) if !issued.is_empty() => {
                    let id = &issued[i % issued.len()];
                    if let Ok(flag) = store.toggle_bookmark(id) {
                        prop_assert_eq!(store.is_bookmarked(id), flag);
                        prop_assert_eq!(store.get(id).map(|p| p.is_bookmarked), Some(flag));
                    }
                }
                Op::Delete(i) if !issued.is_empty() => {
                    let id = &issued[i % issued.len()];
                    let _ = store.delete_post(id);
                    prop_assert!(store.get(id).is_none());
                    prop_assert!(!store.is_bookmarked(id));
                }
                _ => {}
            }
            prop_assert!(store.is_consistent());
        }

        for ((id, kind), count) in expected {
            if let Some(post) = store.get(&id) {
                prop_assert_eq!(post.reactions.get(kind), count);
            }
        }
    }

    #[test]
    fn toggling_twice_restores_the_flag(board in board(), extra in 0usize..4) {
        let mut store = frozen_store();
        for _ in 0..extra {
            store.submit_post(board, PostDraft::default());
        }
        let id = store.submit_post(board, PostDraft::default()).id.clone();

        store.toggle_bookmark(&id).unwrap();
        store.toggle_bookmark(&id).unwrap();
        prop_assert!(!store.get(&id).unwrap().is_bookmarked);
        prop_assert!(!store.is_bookmarked(&id));
        prop_assert!(store.bookmarks().is_empty());
    }

    #[test]
    fn mens_board_stays_closed_to_non_male_users(
        gender in prop::sample::select(vec![Gender::Female, Gender::Unspecified]),
        start in prop::option::of(prop::sample::select(vec![
            BoardId::Announcements,
            BoardId::Batch,
            BoardId::Anonymous,
        ])),
        view in prop::sample::select(vec![View::Home, View::Bookmarks, View::Profile]),
    ) {
        let mut session = SessionController::new();
        session.complete_loading().unwrap();
        session.login(User::new("n", gender, "a")).unwrap();
        if let Some(board) = start {
            session.navigate_to_board(board).unwrap();
        }
        session.navigate_to_app(view).unwrap();

        let before = (session.view(), session.active_board());
        prop_assert!(session.navigate_to_board(BoardId::Mens).is_err());
        prop_assert_eq!((session.view(), session.active_board()), before);
    }
}

#[test]
fn deleted_posts_ignore_every_later_operation() {
    let mut store = frozen_store();
    let id = store
        .submit_post(BoardId::Anonymous, PostDraft::new("gone", "soon"))
        .id
        .clone();
    store.toggle_bookmark(&id).unwrap();
    store.delete_post(&id).unwrap();

    assert!(store.react(&id, ReactionKind::ThumbsUp).is_err());
    assert!(store.toggle_bookmark(&id).is_err());
    assert!(store.delete_post(&id).is_err());
    assert!(store.is_empty());
    assert!(store.bookmarks().is_empty());
}
