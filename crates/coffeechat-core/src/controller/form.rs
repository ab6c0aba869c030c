//! Chat form controller.
//!
//! Holds the editable fields of one create or edit interaction plus the
//! submit state. The host (CLI prompt loop or web handler) feeds input in,
//! calls [`ChatForm::submit`], and follows the returned view.

use coffeechat_types::chat::{Chat, ChatDraft, ChatId};
use coffeechat_types::error::{ChatError, FormError};
use coffeechat_types::view::View;

use crate::cache::ViewCache;
use crate::repository::chat::ChatRepository;
use crate::service::chat::{ChatService, Mutation};

/// Whether the form creates a new chat or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ChatId),
}

/// Submit lifecycle of a form.
///
/// `Idle -> Submitting -> Submitted` on success. A failed submit goes back
/// to `Idle` with the error kept in [`ChatForm::last_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone)]
pub struct ChatForm {
    mode: FormMode,
    guest: String,
    chat_date: String,
    notes: String,
    state: FormState,
    last_error: Option<ChatError>,
}

impl ChatForm {
    /// Empty form for a new chat.
    pub fn create() -> Self {
        Self::with_draft(FormMode::Create, ChatDraft::default())
    }

    /// Form seeded from an existing chat.
    pub fn edit(chat: &Chat) -> Self {
        Self::with_draft(FormMode::Edit(chat.id), chat.to_draft())
    }

    /// Form with explicit contents, e.g. re-rendering a rejected submission.
    pub fn with_draft(mode: FormMode, draft: ChatDraft) -> Self {
        Self {
            mode,
            guest: draft.guest,
            chat_date: draft.chat_date,
            notes: draft.notes,
            state: FormState::Idle,
            last_error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// The error of the most recent failed submit, cleared on the next one.
    pub fn last_error(&self) -> Option<&ChatError> {
        self.last_error.as_ref()
    }

    pub fn guest(&self) -> &str {
        &self.guest
    }

    pub fn chat_date(&self) -> &str {
        &self.chat_date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    // Fields stay editable while a submit is in flight.

    pub fn set_guest(&mut self, guest: impl Into<String>) {
        self.guest = guest.into();
    }

    pub fn set_chat_date(&mut self, chat_date: impl Into<String>) {
        self.chat_date = chat_date.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// The payload the next submit would send.
    pub fn draft(&self) -> ChatDraft {
        ChatDraft::new(&self.guest, &self.chat_date, &self.notes)
    }

    /// Label for the save button.
    pub fn save_label(&self) -> &'static str {
        match self.state {
            FormState::Submitting => "Saving...",
            _ => "Save",
        }
    }

    /// Where "Cancel" goes. Nothing is persisted.
    pub fn cancel(&self) -> View {
        match self.mode {
            FormMode::Create => View::Listing,
            FormMode::Edit(id) => View::Detail(id),
        }
    }

    /// Enter `Submitting` and hand out the payload.
    ///
    /// Fails with [`FormError::AlreadySubmitting`] if a submit is in flight
    /// and with [`FormError::AlreadySubmitted`] once a submit has succeeded.
    pub fn begin_submit(&mut self) -> Result<ChatDraft, FormError> {
        match self.state {
            FormState::Submitting => return Err(FormError::AlreadySubmitting),
            FormState::Submitted => return Err(FormError::AlreadySubmitted),
            FormState::Idle => {}
        }
        self.state = FormState::Submitting;
        self.last_error = None;
        Ok(self.draft())
    }

    /// Record the outcome of a submit started with [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(
        &mut self,
        result: Result<Mutation, ChatError>,
    ) -> Result<Mutation, FormError> {
        match result {
            Ok(mutation) => {
                self.state = FormState::Submitted;
                Ok(mutation)
            }
            Err(err) => {
                self.state = FormState::Idle;
                self.last_error = Some(err.clone());
                Err(FormError::Chat(err))
            }
        }
    }

    /// Submit through the service, creating or updating by mode.
    ///
    /// On success the host must navigate to `mutation.navigate_to`.
    pub async fn submit<R, C>(&mut self, service: &ChatService<R, C>) -> Result<Mutation, FormError>
    where
        R: ChatRepository,
        C: ViewCache,
    {
        let draft = self.begin_submit()?;
        let result = match self.mode {
            FormMode::Create => service.create(&draft).await,
            FormMode::Edit(id) => service.update(id, &draft).await,
        };
        self.finish_submit(result)
    }
}
