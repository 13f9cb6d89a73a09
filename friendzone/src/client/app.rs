//! UI controller
//!
//! [`App`] owns the [`ViewState`] and an API backend. Each public method is
//! one user action. Successful mutations reload all three list views before
//! returning; failures are logged and leave the previous state on screen.

use chrono::NaiveDate;

use super::api::CrmApi;
use super::state::{EditForm, FormTarget, FriendForm, ListField, NoteForm, Tab, ViewState};
use crate::database::CreateNoteRequest;
use crate::error::Result;

pub struct App<A: CrmApi> {
    api: A,
    pub state: ViewState,
}

impl<A: CrmApi> App<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ViewState::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the three list views in parallel and replace them wholesale
    pub async fn load_all(&mut self) -> bool {
        let loaded = tokio::try_join!(
            self.api.get_friends(),
            self.api.get_keep_in_touch_friends(),
            self.api.get_recent_activities(),
        );

        match loaded {
            Ok((friends, keep_in_touch, recent_activities)) => {
                self.state.friends = friends;
                self.state.keep_in_touch = keep_in_touch;
                self.state.recent_activities = recent_activities;
                true
            }
            Err(e) => {
                tracing::error!("Failed to load data: {}", e);
                false
            }
        }
    }

    /// Open the detail view for a friend
    pub async fn select_friend(&mut self, id: i64) -> bool {
        match self.api.get_friend_by_id(id).await {
            Ok(Some(detail)) => {
                self.state.note_form = NoteForm {
                    friend_id: detail.friend.id,
                    text: String::new(),
                };
                self.state.selected_friend = Some(detail);
                self.state.is_detail_dialog_open = true;
                true
            }
            Ok(None) => {
                tracing::warn!("Friend {} no longer exists", id);
                false
            }
            Err(e) => {
                tracing::error!("Failed to load friend details: {}", e);
                false
            }
        }
    }

    pub fn close_detail(&mut self) {
        self.state.is_detail_dialog_open = false;
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.state.active_tab = tab;
    }

    pub fn open_add_friend(&mut self) {
        self.state.friend_form = FriendForm::default();
        self.state.is_add_dialog_open = true;
    }

    pub fn cancel_dialogs(&mut self) {
        self.state.is_add_dialog_open = false;
        self.state.is_edit_dialog_open = false;
    }

    /// Set the name on the add or edit form
    pub fn set_name(&mut self, target: FormTarget, name: &str) {
        match target {
            FormTarget::Add => self.state.friend_form.name = name.to_string(),
            FormTarget::Edit => self.state.edit_form.name = name.to_string(),
        }
    }

    pub fn set_birthday(&mut self, target: FormTarget, birthday: Option<NaiveDate>) {
        match target {
            FormTarget::Add => self.state.friend_form.birthday = birthday,
            FormTarget::Edit => self.state.edit_form.birthday = birthday,
        }
    }

    pub fn set_keep_in_touch(&mut self, target: FormTarget, keep_in_touch: bool) {
        match target {
            FormTarget::Add => self.state.friend_form.keep_in_touch = keep_in_touch,
            FormTarget::Edit => self.state.edit_form.keep_in_touch = keep_in_touch,
        }
    }

    pub fn add_email(&mut self, target: FormTarget, email: &str) -> bool {
        self.add_list_value(target, ListField::Emails, email)
    }

    pub fn remove_email(&mut self, target: FormTarget, index: usize) -> bool {
        self.state.list_editor(target, ListField::Emails).remove(index)
    }

    pub fn add_phone(&mut self, target: FormTarget, phone: &str) -> bool {
        self.add_list_value(target, ListField::Phones, phone)
    }

    pub fn remove_phone(&mut self, target: FormTarget, index: usize) -> bool {
        self.state.list_editor(target, ListField::Phones).remove(index)
    }

    fn add_list_value(&mut self, target: FormTarget, field: ListField, value: &str) -> bool {
        let editor = self.state.list_editor(target, field);
        editor.input = value.to_string();
        editor.commit_input()
    }

    /// Submit the add-friend form
    pub async fn submit_add_friend(&mut self) -> bool {
        let req = self.state.friend_form.to_request();

        self.state.is_loading = true;
        let result = self.api.create_friend(req).await;
        let ok = self.finish_mutation("create friend", result).await;

        if ok {
            self.state.friend_form = FriendForm::default();
            self.state.is_add_dialog_open = false;
        }
        ok
    }

    /// Seed the edit form from a friend in any of the loaded views
    pub fn prepare_edit(&mut self, id: i64) -> bool {
        let friend = self
            .state
            .selected_friend
            .as_ref()
            .map(|detail| &detail.friend)
            .filter(|f| f.id == id)
            .or_else(|| self.state.friends.iter().find(|f| f.id == id))
            .or_else(|| self.state.keep_in_touch.iter().find(|f| f.id == id));

        match friend {
            Some(friend) => {
                self.state.edit_form = EditForm::from_friend(friend);
                self.state.is_add_dialog_open = false;
                self.state.is_edit_dialog_open = true;
                true
            }
            None => false,
        }
    }

    /// Submit the edit form
    pub async fn submit_edit(&mut self) -> bool {
        let req = self.state.edit_form.to_request();

        self.state.is_loading = true;
        let result = self.api.update_friend(req).await;
        let ok = self.finish_mutation("update friend", result).await;

        if ok {
            self.state.is_edit_dialog_open = false;
            self.refresh_selected().await;
        }
        ok
    }

    /// Delete a friend and close the detail view
    pub async fn delete_friend(&mut self, id: i64) -> bool {
        self.state.is_loading = true;
        let result = self.api.delete_friend(id).await;
        let ok = self.finish_mutation("delete friend", result).await;

        if ok {
            self.state.is_detail_dialog_open = false;
            if self.selected_id() == Some(id) {
                self.state.selected_friend = None;
            }
        }
        ok
    }

    /// Log a note for the friend in the note form
    pub async fn submit_note(&mut self, text: &str) -> bool {
        self.state.note_form.text = text.to_string();
        let req = CreateNoteRequest {
            friend_id: self.state.note_form.friend_id,
            text: self.state.note_form.text.clone(),
        };

        self.state.is_loading = true;
        let result = self.api.create_note(req).await;
        if result.is_ok() {
            self.refresh_selected().await;
        }

        let ok = self.finish_mutation("add note", result).await;
        if ok {
            self.state.note_form.text.clear();
        }
        ok
    }

    fn selected_id(&self) -> Option<i64> {
        self.state.selected_friend.as_ref().map(|d| d.friend.id)
    }

    async fn refresh_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };

        match self.api.get_friend_by_id(id).await {
            Ok(Some(detail)) => self.state.selected_friend = Some(detail),
            Ok(None) => {}
            Err(e) => tracing::error!("Failed to refresh friend details: {}", e),
        }
    }

    /// Reload every list view after a successful mutation
    async fn finish_mutation<T>(&mut self, action: &str, result: Result<T>) -> bool {
        let ok = match result {
            Ok(_) => {
                self.load_all().await;
                true
            }
            Err(e) => {
                tracing::error!("Failed to {}: {}", action, e);
                false
            }
        };

        self.state.is_loading = false;
        ok
    }
}
