//! # Commands
//!
//! The line protocol the terminal front end speaks. Each line maps to one
//! core operation; `render` turns the current state back into JSON.

use cb_core::{
    AppError, BoardId, Community, Gender, PostDraft, ReactionKind, ReportSink, Result, Screen,
    ShareSurface, User, View,
};
use serde_json::{json, Value};

pub const HELP: &str = "\
commands:
  loaded | signup | back | logout | quit
  login <name> <gender> <avatar>     register <name> <gender> <avatar>
  app <view> | home | board <board>
  open <post-id> | close
  post <title> | <content> [| <batch>]
  react <post-id> <thumbsUp|thumbsDown|heart>
  bookmark <post-id> | delete <post-id>
  share <post-id> | report <post-id> <reason>
  show | help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Loaded,
    SignUp,
    BackToLogin,
    Login(User),
    Register(User),
    Logout,
    App(View),
    Home,
    Board(BoardId),
    Open(String),
    Close,
    Post(PostDraft),
    React(String, ReactionKind),
    Bookmark(String),
    Delete(String),
    Share(String),
    Report(String, String),
    Show,
    Help,
    Quit,
}

fn usage(msg: &str) -> AppError {
    AppError::ValidationError(format!("usage: {msg}"))
}

fn parse_user(args: &str, verb: &str) -> Result<User> {
    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(gender), Some(avatar)) => {
            Ok(User::new(name, Gender::parse_lenient(gender), avatar))
        }
        _ => Err(usage(&format!("{verb} <name> <gender> <avatar>"))),
    }
}

fn parse_post(args: &str) -> Result<PostDraft> {
    let mut fields = args.splitn(3, '|').map(str::trim);
    let title = fields.next().unwrap_or_default();
    let content = fields
        .next()
        .ok_or_else(|| usage("post <title> | <content> [| <batch>]"))?;
    let mut draft = PostDraft::new(title, content);
    if let Some(batch) = fields.next() {
        draft = draft.with_batch(batch);
    }
    Ok(draft)
}

fn one_arg(args: &str, verb: &str) -> Result<String> {
    let arg = args.trim();
    if arg.is_empty() || arg.contains(char::is_whitespace) {
        return Err(usage(&format!("{verb} <post-id>")));
    }
    Ok(arg.to_string())
}

impl std::str::FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, args) = line.split_once(' ').unwrap_or((line, ""));
        let args = args.trim();

        match verb {
            "loaded" => Ok(Self::Loaded),
            "signup" => Ok(Self::SignUp),
            "back" => Ok(Self::BackToLogin),
            "login" => parse_user(args, verb).map(Self::Login),
            "register" => parse_user(args, verb).map(Self::Register),
            "logout" => Ok(Self::Logout),
            "app" => args.parse().map(Self::App),
            "home" => Ok(Self::Home),
            "board" => args.parse().map(Self::Board),
            "open" => one_arg(args, verb).map(Self::Open),
            "close" => Ok(Self::Close),
            "post" => parse_post(args).map(Self::Post),
            "react" => {
                let (id, kind) = args
                    .split_once(' ')
                    .ok_or_else(|| usage("react <post-id> <kind>"))?;
                Ok(Self::React(id.to_string(), kind.parse()?))
            }
            "bookmark" => one_arg(args, verb).map(Self::Bookmark),
            "delete" => one_arg(args, verb).map(Self::Delete),
            "share" => one_arg(args, verb).map(Self::Share),
            "report" => {
                let (id, reason) = args
                    .split_once(' ')
                    .ok_or_else(|| usage("report <post-id> <reason>"))?;
                Ok(Self::Report(id.to_string(), reason.trim().to_string()))
            }
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(AppError::ValidationError(format!(
                "unknown command '{other}'"
            ))),
        }
    }
}

/// The surfaces commands hand side effects to.
pub struct Surfaces<'a> {
    pub share: &'a dyn ShareSurface,
    pub report: &'a dyn ReportSink,
}

/// Runs one command. Returns a short note for the operator, if any.
pub fn apply(
    community: &mut Community,
    command: Command,
    surfaces: &Surfaces<'_>,
) -> Result<Option<String>> {
    let note = match command {
        Command::Loaded => community.complete_loading().map(|_| None)?,
        Command::SignUp => community.go_to_registration().map(|_| None)?,
        Command::BackToLogin => community.back_to_login().map(|_| None)?,
        Command::Login(user) => community.login(user).map(|_| None)?,
        Command::Register(user) => community.register(user).map(|_| None)?,
        Command::Logout => community.logout().map(|_| None)?,
        Command::App(view) => community.navigate_to_app(view).map(|_| None)?,
        Command::Home => community.back_to_home().map(|_| None)?,
        Command::Board(board) => community.navigate_to_board(board).map(|_| None)?,
        Command::Open(id) => community.select_post(&id).map(|_| None)?,
        Command::Close => {
            community.clear_selected_post();
            None
        }
        Command::Post(draft) => {
            let post = community.submit_post(draft)?;
            Some(format!("posted {}", post.id))
        }
        Command::React(id, kind) => {
            let count = community.react(&id, kind)?;
            Some(format!("{id} {kind:?} = {count}"))
        }
        Command::Bookmark(id) => {
            let on = community.toggle_bookmark(&id)?;
            Some(format!("{id} bookmarked: {on}"))
        }
        Command::Delete(id) => {
            let post = community.delete_post(&id)?;
            Some(format!("deleted {}", post.id))
        }
        Command::Share(id) => {
            community.share(&id, surfaces.share)?;
            Some(format!("shared {id}"))
        }
        Command::Report(id, reason) => {
            community.report(&id, &reason, surfaces.report)?;
            Some(format!("reported {id}"))
        }
        Command::Show | Command::Quit => None,
        Command::Help => Some(HELP.to_string()),
    };
    Ok(note)
}

/// Snapshot of what the current screen shows.
pub fn render(community: &Community) -> Value {
    let screen = community.screen();
    let mut out = json!({
        "screen": screen,
        "user": community.session().user(),
        "selected": community.selected_post(),
    });

    let listing = match screen {
        Screen::Board(_) => community
            .board_posts()
            .ok()
            .map(|posts| serde_json::to_value(posts).unwrap_or(Value::Null)),
        Screen::Bookmarks => community
            .bookmarks()
            .ok()
            .map(|posts| serde_json::to_value(posts).unwrap_or(Value::Null)),
        _ => None,
    };
    if let Some(posts) = listing {
        out["posts"] = posts;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_core::{CommunityConfig, Report, SharePayload};

    struct Discard;

    impl ShareSurface for Discard {
        fn share(&self, _: &SharePayload) -> anyhow::Result<()> {
            Ok(())
        }
    }

    impl ReportSink for Discard {
        fn report(&self, _: &Report) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn run(community: &mut Community, line: &str) -> Result<Option<String>> {
        let surfaces = Surfaces {
            share: &Discard,
            report: &Discard,
        };
        apply(community, line.parse()?, &surfaces)
    }

    #[test]
    fn parses_post_with_optional_batch() {
        let cmd: Command = "post Hi | Hello there | 2026".parse().unwrap();
        assert_eq!(
            cmd,
            Command::Post(PostDraft::new("Hi", "Hello there").with_batch("2026"))
        );
        let cmd: Command = "post Hi | Hello".parse().unwrap();
        assert_eq!(cmd, Command::Post(PostDraft::new("Hi", "Hello")));
        assert!("post only-a-title".parse::<Command>().is_err());
    }

    #[test]
    fn parses_login_with_lenient_gender() {
        let cmd: Command = "login kim nonbinary 🐢".parse().unwrap();
        assert_eq!(
            cmd,
            Command::Login(User::new("kim", Gender::Unspecified, "🐢"))
        );
        assert!("login kim".parse::<Command>().is_err());
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("board memes".parse::<Command>().is_err());
        assert!("app settings".parse::<Command>().is_err());
        assert!("react mens-1 clap".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[test]
    fn drives_a_session_end_to_end() {
        let mut community = Community::new(CommunityConfig::default());
        run(&mut community, "loaded").unwrap();
        run(&mut community, "login kim female 🐢").unwrap();
        run(&mut community, "board womens").unwrap();

        let note = run(&mut community, "post Hi | Hello").unwrap().unwrap();
        let id = note.trim_start_matches("posted ").to_string();
        assert!(id.starts_with("womens-"));

        run(&mut community, &format!("react {id} heart")).unwrap();
        run(&mut community, &format!("bookmark {id}")).unwrap();

        let view = render(&community);
        assert_eq!(view["screen"]["screen"], "board");
        assert_eq!(view["screen"]["board"], "womens");
        assert_eq!(view["posts"][0]["reactions"]["heart"], 1);
        assert_eq!(view["posts"][0]["isBookmarked"], true);

        assert!(run(&mut community, "board mens").is_err());
        assert_eq!(render(&community)["screen"]["board"], "womens");
    }
}
