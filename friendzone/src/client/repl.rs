//! Line-oriented driver for [`App`].
//!
//! Reads commands from any async reader, applies them, and writes the
//! rendered view after each one.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::api::CrmApi;
use super::app::App;
use super::command::{CommandError, UiCommand, HELP};
use super::render::render;
use super::state::{FormTarget, ListField};
use crate::error::Result;

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Outcome of one command: flow control plus an optional message for the user
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub flow: Flow,
    pub message: Option<String>,
}

impl Outcome {
    fn ok() -> Self {
        Self {
            flow: Flow::Continue,
            message: None,
        }
    }

    fn say(message: impl Into<String>) -> Self {
        Self {
            flow: Flow::Continue,
            message: Some(message.into()),
        }
    }

    fn check(ok: bool, failure: &str) -> Self {
        if ok {
            Self::ok()
        } else {
            Self::say(failure)
        }
    }
}

fn open_form<A: CrmApi>(app: &App<A>) -> Option<FormTarget> {
    if app.state.is_edit_dialog_open {
        Some(FormTarget::Edit)
    } else if app.state.is_add_dialog_open {
        Some(FormTarget::Add)
    } else {
        None
    }
}

const NO_FORM: &str = "No open form; start one with `new` or `edit <id>`.";

/// Apply one command to the app
pub async fn dispatch<A: CrmApi>(app: &mut App<A>, command: UiCommand) -> Outcome {
    match command {
        UiCommand::Help => Outcome::say(HELP),
        UiCommand::Quit => Outcome {
            flow: Flow::Quit,
            message: None,
        },
        UiCommand::Refresh => Outcome::check(app.load_all().await, "Failed to load data."),
        UiCommand::Tab(tab) => {
            app.close_detail();
            app.switch_tab(tab);
            Outcome::ok()
        }
        UiCommand::Show(id) => {
            Outcome::check(app.select_friend(id).await, "Could not load that friend.")
        }
        UiCommand::Close => {
            app.close_detail();
            Outcome::ok()
        }
        UiCommand::New => {
            app.open_add_friend();
            Outcome::ok()
        }
        UiCommand::Edit(id) => Outcome::check(
            app.prepare_edit(id),
            "That friend is not in any loaded view; try `refresh`.",
        ),
        UiCommand::Cancel => {
            app.cancel_dialogs();
            Outcome::ok()
        }
        UiCommand::Save => match open_form(app) {
            Some(FormTarget::Add) => {
                Outcome::check(app.submit_add_friend().await, "Failed to create friend.")
            }
            Some(FormTarget::Edit) => {
                Outcome::check(app.submit_edit().await, "Failed to update friend.")
            }
            None => Outcome::say(NO_FORM),
        },
        UiCommand::Delete(id) => {
            Outcome::check(app.delete_friend(id).await, "Failed to delete friend.")
        }
        UiCommand::Note(text) => {
            if app.state.selected_friend.is_none() || !app.state.is_detail_dialog_open {
                return Outcome::say("Open a friend with `show <id>` first.");
            }
            Outcome::check(app.submit_note(&text).await, "Failed to add note.")
        }
        field_edit => {
            let Some(target) = open_form(app) else {
                return Outcome::say(NO_FORM);
            };
            apply_field_edit(app, target, field_edit)
        }
    }
}

fn apply_field_edit<A: CrmApi>(app: &mut App<A>, target: FormTarget, edit: UiCommand) -> Outcome {
    match edit {
        UiCommand::Name(name) => app.set_name(target, &name),
        UiCommand::Birthday(birthday) => app.set_birthday(target, birthday),
        UiCommand::KeepInTouch(keep) => app.set_keep_in_touch(target, keep),
        UiCommand::AddItem(ListField::Emails, value) => {
            app.add_email(target, &value);
        }
        UiCommand::AddItem(ListField::Phones, value) => {
            app.add_phone(target, &value);
        }
        UiCommand::RemoveItem(ListField::Emails, index) => {
            return Outcome::check(app.remove_email(target, index), "No email at that index.");
        }
        UiCommand::RemoveItem(ListField::Phones, index) => {
            return Outcome::check(app.remove_phone(target, index), "No phone at that index.");
        }
        _ => {}
    }
    Outcome::ok()
}

/// Run until `quit` or end of input
pub async fn run<A, R, W>(app: &mut App<A>, input: R, mut output: W) -> Result<()>
where
    A: CrmApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    app.load_all().await;
    output.write_all(render(&app.state).as_bytes()).await?;
    output.write_all(b"> ").await?;
    output.flush().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = match UiCommand::parse(&line) {
            Ok(command) => dispatch(app, command).await,
            Err(CommandError::Empty) => Outcome::ok(),
            Err(e) => Outcome::say(e.to_string()),
        };

        if outcome.flow == Flow::Quit {
            break;
        }

        if let Some(message) = outcome.message {
            output.write_all(message.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
        output.write_all(render(&app.state).as_bytes()).await?;
        output.write_all(b"> ").await?;
        output.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::client::api::LocalApi;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_app() -> App<LocalApi> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        App::new(LocalApi::new(AppState::new(pool)))
    }

    #[tokio::test]
    async fn test_field_edits_need_open_form() {
        let mut app = create_test_app().await;

        let outcome = dispatch(&mut app, UiCommand::Name("Nobody".to_string())).await;
        assert_eq!(outcome.message.as_deref(), Some(NO_FORM));

        let outcome = dispatch(&mut app, UiCommand::Save).await;
        assert_eq!(outcome.message.as_deref(), Some(NO_FORM));
    }

    #[tokio::test]
    async fn test_note_needs_open_friend() {
        let mut app = create_test_app().await;

        let outcome = dispatch(&mut app, UiCommand::Note("hi".to_string())).await;

        assert!(outcome.message.is_some());
        assert!(app.state.recent_activities.is_empty());
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let mut app = create_test_app().await;
        let script = "\
new
name Alice
email add alice@example.com
phone add 555-0123
birthday 1990-05-15
save
show 1
note Lunch downtown
tab activity
quit
refresh
";
        let mut output = Vec::new();

        run(&mut app, script.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("== New friend =="));
        assert!(text.contains("== Alice (#1) =="));
        assert!(text.contains("Recent Activities (1)"));
        assert!(text.contains("Alice (#1): Lunch downtown"));

        assert_eq!(app.state.friends.len(), 1);
        assert_eq!(
            app.state.friends[0].phones,
            Some(vec!["555-0123".to_string()])
        );
        assert_eq!(app.state.recent_activities.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_command_reports_error() {
        let mut app = create_test_app().await;
        let mut output = Vec::new();

        run(&mut app, "dance\n".as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("unknown command: dance"));
    }
}
