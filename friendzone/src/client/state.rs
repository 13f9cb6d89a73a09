//! View state for the terminal UI
//!
//! Holds the four server-derived containers plus the transient form values.
//! Nothing here talks to the server; [`super::app::App`] drives transitions.

use chrono::NaiveDate;

use crate::database::{
    CreateFriendRequest, Friend, FriendWithNotes, RecentActivity, UpdateFriendRequest,
};

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    KeepInTouch,
    Activities,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "All Friends",
            Tab::KeepInTouch => "Keep in Touch",
            Tab::Activities => "Recent Activities",
        }
    }
}

/// Append/remove editor for a list of strings.
///
/// `values` is `None` until something is added or the editor is seeded with
/// an existing list, so an untouched field stays distinct from an empty one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEditor {
    pub values: Option<Vec<String>>,
    pub input: String,
}

impl ListEditor {
    pub fn seeded(values: Option<Vec<String>>) -> Self {
        Self {
            values,
            input: String::new(),
        }
    }

    /// Push the trimmed pending input; blank input is ignored
    pub fn commit_input(&mut self) -> bool {
        let value = self.input.trim().to_string();
        if value.is_empty() {
            return false;
        }

        self.values.get_or_insert_with(Vec::new).push(value);
        self.input.clear();
        true
    }

    /// Remove the entry at `index`, leaving an empty list rather than `None`
    pub fn remove(&mut self, index: usize) -> bool {
        match self.values.as_mut() {
            Some(values) if index < values.len() => {
                values.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn items(&self) -> &[String] {
        self.values.as_deref().unwrap_or_default()
    }
}

/// Values for the "add friend" dialog
#[derive(Debug, Clone, PartialEq)]
pub struct FriendForm {
    pub name: String,
    pub emails: ListEditor,
    pub phones: ListEditor,
    pub birthday: Option<NaiveDate>,
    pub keep_in_touch: bool,
}

impl Default for FriendForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            emails: ListEditor::seeded(Some(Vec::new())),
            phones: ListEditor::seeded(Some(Vec::new())),
            birthday: None,
            keep_in_touch: true,
        }
    }
}

impl FriendForm {
    pub fn to_request(&self) -> CreateFriendRequest {
        CreateFriendRequest {
            name: self.name.clone(),
            emails: self.emails.values.clone(),
            phones: self.phones.values.clone(),
            birthday: self.birthday,
            keep_in_touch: self.keep_in_touch,
        }
    }
}

/// Values for the "edit friend" dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm {
    pub id: i64,
    pub name: String,
    pub emails: ListEditor,
    pub phones: ListEditor,
    pub birthday: Option<NaiveDate>,
    pub keep_in_touch: bool,
}

impl EditForm {
    pub fn from_friend(friend: &Friend) -> Self {
        Self {
            id: friend.id,
            name: friend.name.clone(),
            emails: ListEditor::seeded(friend.emails.clone()),
            phones: ListEditor::seeded(friend.phones.clone()),
            birthday: friend.birthday,
            keep_in_touch: friend.keep_in_touch,
        }
    }

    /// Every editable field is sent; `last_contacted` is left to notes
    pub fn to_request(&self) -> UpdateFriendRequest {
        UpdateFriendRequest {
            id: self.id,
            name: Some(self.name.clone()),
            emails: Some(self.emails.values.clone()),
            phones: Some(self.phones.values.clone()),
            birthday: Some(self.birthday),
            last_contacted: None,
            keep_in_touch: Some(self.keep_in_touch),
        }
    }
}

/// Values for the "add note" form in the detail dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteForm {
    pub friend_id: i64,
    pub text: String,
}

/// Which form a field edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Add,
    Edit,
}

/// Everything the UI renders
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub friends: Vec<Friend>,
    pub keep_in_touch: Vec<Friend>,
    pub recent_activities: Vec<RecentActivity>,
    pub selected_friend: Option<FriendWithNotes>,

    pub friend_form: FriendForm,
    pub edit_form: EditForm,
    pub note_form: NoteForm,

    pub active_tab: Tab,
    pub is_loading: bool,
    pub is_add_dialog_open: bool,
    pub is_edit_dialog_open: bool,
    pub is_detail_dialog_open: bool,
}

impl ViewState {
    pub fn list_editor(&mut self, target: FormTarget, field: ListField) -> &mut ListEditor {
        let (emails, phones) = match target {
            FormTarget::Add => (&mut self.friend_form.emails, &mut self.friend_form.phones),
            FormTarget::Edit => (&mut self.edit_form.emails, &mut self.edit_form.phones),
        };
        match field {
            ListField::Emails => emails,
            ListField::Phones => phones,
        }
    }
}

/// The two list-valued friend fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Emails,
    Phones,
}
