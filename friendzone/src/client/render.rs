//! Plain-text rendering of the view state.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};

use super::state::{EditForm, FriendForm, ListEditor, Tab, ViewState};
use crate::database::{Friend, FriendWithNotes, RecentActivity};

/// Render whatever the UI currently shows: open dialogs first, then the tab
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();

    if state.is_add_dialog_open {
        out.push_str(&render_friend_form(&state.friend_form));
    } else if state.is_edit_dialog_open {
        out.push_str(&render_edit_form(&state.edit_form));
    } else if let Some(detail) = state
        .selected_friend
        .as_ref()
        .filter(|_| state.is_detail_dialog_open)
    {
        out.push_str(&render_detail(detail));
    } else {
        out.push_str(&render_tab(state));
    }

    if state.is_loading {
        out.push_str("\n(loading...)\n");
    }
    out
}

/// Tab header with counts, followed by the active list
pub fn render_tab(state: &ViewState) -> String {
    let mut out = String::new();

    let tabs = [
        (Tab::All, state.friends.len()),
        (Tab::KeepInTouch, state.keep_in_touch.len()),
        (Tab::Activities, state.recent_activities.len()),
    ];
    let header: Vec<String> = tabs
        .iter()
        .map(|(tab, count)| {
            let label = format!("{} ({})", tab.label(), count);
            if *tab == state.active_tab {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", header.join(" | "));
    out.push('\n');

    match state.active_tab {
        Tab::All => {
            if state.friends.is_empty() {
                out.push_str("No friends yet! Add your first one with `new`.\n");
            }
            for friend in &state.friends {
                out.push_str(&friend_line(friend));
            }
        }
        Tab::KeepInTouch => {
            if state.keep_in_touch.is_empty() {
                out.push_str("Nobody to keep in touch with.\n");
            }
            for friend in &state.keep_in_touch {
                out.push_str(&friend_line(friend));
            }
        }
        Tab::Activities => {
            if state.recent_activities.is_empty() {
                out.push_str("No activity yet.\n");
            }
            for activity in &state.recent_activities {
                out.push_str(&activity_line(activity));
            }
        }
    }
    out
}

fn friend_line(friend: &Friend) -> String {
    let mut line = format!("#{:<4} {}", friend.id, friend.name);
    if friend.keep_in_touch {
        line.push_str("  *");
    }
    if let Some(birthday) = friend.birthday {
        let _ = write!(line, "  birthday {}", birthday.format("%Y-%m-%d"));
    }
    match friend.last_contacted {
        Some(ts) => {
            let _ = write!(line, "  last {}", local_date(ts));
        }
        None => line.push_str("  never contacted"),
    }
    line.push('\n');
    line
}

fn activity_line(activity: &RecentActivity) -> String {
    format!(
        "{}  {} (#{}): {}\n",
        local_datetime(activity.timestamp),
        activity.friend_name,
        activity.friend_id,
        activity.text
    )
}

/// Full detail view for one friend
pub fn render_detail(detail: &FriendWithNotes) -> String {
    let friend = &detail.friend;
    let mut out = String::new();

    let _ = writeln!(out, "== {} (#{}) ==", friend.name, friend.id);
    let _ = writeln!(out, "Emails:   {}", list_or_none(friend.emails.as_deref()));
    let _ = writeln!(out, "Phones:   {}", list_or_none(friend.phones.as_deref()));
    let _ = writeln!(
        out,
        "Birthday: {}",
        friend
            .birthday
            .map(|b| b.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(
        out,
        "Last contacted: {}",
        friend
            .last_contacted
            .map(local_date)
            .unwrap_or_else(|| "never".to_string())
    );
    let _ = writeln!(
        out,
        "Keep in touch: {}",
        if friend.keep_in_touch { "yes" } else { "no" }
    );

    let _ = writeln!(out, "\nNotes ({}):", detail.notes.len());
    if detail.notes.is_empty() {
        out.push_str("  No notes yet. Log one with `note <text>`.\n");
    }
    for note in &detail.notes {
        let _ = writeln!(out, "  {}  {}", local_datetime(note.timestamp), note.text);
    }
    out
}

pub fn render_friend_form(form: &FriendForm) -> String {
    let mut out = String::from("== New friend ==\n");
    form_fields(
        &mut out,
        &form.name,
        &form.emails,
        &form.phones,
        form.birthday,
        form.keep_in_touch,
    );
    out.push_str("`save` to create, `cancel` to discard\n");
    out
}

pub fn render_edit_form(form: &EditForm) -> String {
    let mut out = format!("== Edit friend #{} ==\n", form.id);
    form_fields(
        &mut out,
        &form.name,
        &form.emails,
        &form.phones,
        form.birthday,
        form.keep_in_touch,
    );
    out.push_str("`save` to update, `cancel` to discard\n");
    out
}

fn form_fields(
    out: &mut String,
    name: &str,
    emails: &ListEditor,
    phones: &ListEditor,
    birthday: Option<chrono::NaiveDate>,
    keep_in_touch: bool,
) {
    let _ = writeln!(out, "Name:     {}", name);
    let _ = writeln!(out, "Emails:   {}", indexed(emails));
    let _ = writeln!(out, "Phones:   {}", indexed(phones));
    let _ = writeln!(
        out,
        "Birthday: {}",
        birthday
            .map(|b| b.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(out, "Keep in touch: {}", if keep_in_touch { "on" } else { "off" });
}

fn indexed(editor: &ListEditor) -> String {
    if editor.items().is_empty() {
        return "-".to_string();
    }
    editor
        .items()
        .iter()
        .enumerate()
        .map(|(i, v)| format!("[{}] {}", i, v))
        .collect::<Vec<_>>()
        .join("  ")
}

fn list_or_none(list: Option<&[String]>) -> String {
    match list {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => "-".to_string(),
    }
}

fn local_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn local_datetime(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
