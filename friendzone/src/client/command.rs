//! Parsing of terminal input lines into UI actions.

use chrono::NaiveDate;
use thiserror::Error;

use super::state::{ListField, Tab};

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    Help,
    Quit,
    Refresh,
    Tab(Tab),
    Show(i64),
    Close,
    New,
    Edit(i64),
    Name(String),
    AddItem(ListField, String),
    RemoveItem(ListField, usize),
    Birthday(Option<NaiveDate>),
    KeepInTouch(bool),
    Save,
    Cancel,
    Delete(i64),
    Note(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
Commands:
  tab all|keep|activity     switch tab
  refresh                   reload every list
  show <id>                 open a friend's details
  close                     close the details view
  new                       start the add-friend form
  edit <id>                 start the edit form for a friend
  name <text>               set the name on the open form
  email add <address>       append an email to the open form
  email rm <index>          remove an email from the open form
  phone add <number>        append a phone to the open form
  phone rm <index>          remove a phone from the open form
  birthday <YYYY-MM-DD|none>
  keep on|off               keep-in-touch flag on the open form
  save                      submit the open form
  cancel                    discard the open form
  delete <id>               delete a friend and their notes
  note <text>               log a note for the open friend
  quit";

impl UiCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "help" | "?" => Ok(UiCommand::Help),
            "quit" | "exit" | "q" => Ok(UiCommand::Quit),
            "refresh" | "ls" => Ok(UiCommand::Refresh),
            "tab" => parse_tab(rest).map(UiCommand::Tab),
            "show" => parse_id(rest, "show <id>").map(UiCommand::Show),
            "close" => Ok(UiCommand::Close),
            "new" | "add" => Ok(UiCommand::New),
            "edit" => parse_id(rest, "edit <id>").map(UiCommand::Edit),
            "name" if !rest.is_empty() => Ok(UiCommand::Name(rest.to_string())),
            "name" => Err(CommandError::Usage("name <text>")),
            "email" => parse_list_edit(ListField::Emails, rest, EMAIL_USAGE),
            "phone" => parse_list_edit(ListField::Phones, rest, PHONE_USAGE),
            "birthday" => parse_birthday(rest).map(UiCommand::Birthday),
            "keep" => match rest {
                "on" | "yes" | "true" => Ok(UiCommand::KeepInTouch(true)),
                "off" | "no" | "false" => Ok(UiCommand::KeepInTouch(false)),
                _ => Err(CommandError::Usage("keep on|off")),
            },
            "save" => Ok(UiCommand::Save),
            "cancel" => Ok(UiCommand::Cancel),
            "delete" | "rm" => parse_id(rest, "delete <id>").map(UiCommand::Delete),
            "note" => Ok(UiCommand::Note(rest.to_string())),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

const EMAIL_USAGE: &str = "email add <address> | email rm <index>";
const PHONE_USAGE: &str = "phone add <number> | phone rm <index>";

fn parse_tab(arg: &str) -> Result<Tab, CommandError> {
    match arg {
        "all" => Ok(Tab::All),
        "keep" | "keepintouch" => Ok(Tab::KeepInTouch),
        "activity" | "activities" => Ok(Tab::Activities),
        _ => Err(CommandError::Usage("tab all|keep|activity")),
    }
}

fn parse_id(arg: &str, usage: &'static str) -> Result<i64, CommandError> {
    arg.parse().map_err(|_| CommandError::Usage(usage))
}

fn parse_list_edit(
    field: ListField,
    rest: &str,
    usage: &'static str,
) -> Result<UiCommand, CommandError> {
    let (action, value) = rest
        .split_once(char::is_whitespace)
        .map(|(a, v)| (a, v.trim()))
        .ok_or(CommandError::Usage(usage))?;

    match action {
        "add" => Ok(UiCommand::AddItem(field, value.to_string())),
        "rm" | "remove" => value
            .parse()
            .map(|index| UiCommand::RemoveItem(field, index))
            .map_err(|_| CommandError::Usage(usage)),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_birthday(arg: &str) -> Result<Option<NaiveDate>, CommandError> {
    if arg == "none" || arg == "-" {
        return Ok(None);
    }
    NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| CommandError::Usage("birthday <YYYY-MM-DD|none>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(UiCommand::parse("help"), Ok(UiCommand::Help));
        assert_eq!(UiCommand::parse("  QUIT "), Ok(UiCommand::Quit));
        assert_eq!(UiCommand::parse("show 12"), Ok(UiCommand::Show(12)));
        assert_eq!(UiCommand::parse("tab keep"), Ok(UiCommand::Tab(Tab::KeepInTouch)));
        assert_eq!(UiCommand::parse("keep off"), Ok(UiCommand::KeepInTouch(false)));
    }

    #[test]
    fn test_parse_text_arguments() {
        assert_eq!(
            UiCommand::parse("name Alice   Johnson"),
            Ok(UiCommand::Name("Alice   Johnson".to_string()))
        );
        assert_eq!(
            UiCommand::parse("note Met for lunch, talked about travel"),
            Ok(UiCommand::Note("Met for lunch, talked about travel".to_string()))
        );
    }

    #[test]
    fn test_parse_list_edits() {
        assert_eq!(
            UiCommand::parse("email add a@example.com"),
            Ok(UiCommand::AddItem(ListField::Emails, "a@example.com".to_string()))
        );
        assert_eq!(
            UiCommand::parse("phone rm 1"),
            Ok(UiCommand::RemoveItem(ListField::Phones, 1))
        );
        assert!(matches!(
            UiCommand::parse("phone rm x"),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(UiCommand::parse("email"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_parse_birthday() {
        assert_eq!(
            UiCommand::parse("birthday 1990-05-15"),
            Ok(UiCommand::Birthday(NaiveDate::from_ymd_opt(1990, 5, 15)))
        );
        assert_eq!(UiCommand::parse("birthday none"), Ok(UiCommand::Birthday(None)));
        assert!(UiCommand::parse("birthday 15/05/1990").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(UiCommand::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            UiCommand::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert!(matches!(UiCommand::parse("show abc"), Err(CommandError::Usage(_))));
    }
}
