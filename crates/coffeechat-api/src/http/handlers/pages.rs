//! Page handlers: listing, detail, new/edit forms and delete.
//!
//! Every mutation is posted as an HTML form and answered with a redirect to
//! the view the service navigated to (303 See Other). A rejected form is
//! re-rendered in place with 422 and the message inline.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::{Deserialize, Serialize};

use coffeechat_core::controller::delete::{AssumeYes, DeleteAction, DeleteOutcome};
use coffeechat_core::controller::form::{ChatForm, FormMode};
use coffeechat_types::chat::{Chat, ChatDraft, ChatId};
use coffeechat_types::error::{ChatError, FormError};
use coffeechat_types::view::View;

use crate::http::error::AppError;
use crate::state::AppState;

/// Fields posted by the chat form. Missing fields arrive empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatFormInput {
    pub guest: String,
    pub chat_date: String,
    pub notes: String,
}

impl From<ChatFormInput> for ChatDraft {
    fn from(input: ChatFormInput) -> Self {
        ChatDraft::new(input.guest, input.chat_date, input.notes)
    }
}

/// A chat as the templates see it.
#[derive(Debug, Serialize)]
struct ChatRow<'a> {
    id: ChatId,
    guest: &'a str,
    date: String,
    notes: &'a str,
}

impl<'a> From<&'a Chat> for ChatRow<'a> {
    fn from(chat: &'a Chat) -> Self {
        Self {
            id: chat.id,
            guest: &chat.guest,
            date: chat.display_date(),
            notes: &chat.notes,
        }
    }
}

/// GET / - All chats.
pub async fn listing(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let chats = state.chat_service.list().await?;
    let rows: Vec<ChatRow<'_>> = chats.iter().map(ChatRow::from).collect();

    let mut ctx = tera::Context::new();
    ctx.insert("chats", &rows);
    ctx.insert("delete_prompt", DeleteAction::PROMPT);
    Ok(Html(state.tera.render("listing.html", &ctx)?))
}

/// GET /chats/{id} - One chat.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<ChatId>,
) -> Result<Html<String>, AppError> {
    let chat = state.chat_service.get(id).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("chat", &ChatRow::from(&chat));
    ctx.insert("delete_prompt", DeleteAction::PROMPT);
    Ok(Html(state.tera.render("detail.html", &ctx)?))
}

/// GET /chats/new - Empty form.
pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_form(&state, &ChatForm::create()).map(Html)
}

/// GET /chats/{id}/edit - Form prefilled with the stored chat.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<ChatId>,
) -> Result<Html<String>, AppError> {
    let chat = state.chat_service.get(id).await?;
    render_form(&state, &ChatForm::edit(&chat)).map(Html)
}

/// POST /chats - Create a chat.
pub async fn create(
    State(state): State<AppState>,
    Form(input): Form<ChatFormInput>,
) -> Result<Response, AppError> {
    submit(&state, ChatForm::with_draft(FormMode::Create, input.into())).await
}

/// POST /chats/{id} - Replace a chat.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ChatId>,
    Form(input): Form<ChatFormInput>,
) -> Result<Response, AppError> {
    submit(&state, ChatForm::with_draft(FormMode::Edit(id), input.into())).await
}

/// POST /chats/{id}/delete - Delete a chat.
///
/// The browser asks for confirmation before posting, so reaching this
/// handler is the explicit yes.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ChatId>,
) -> Result<Response, AppError> {
    let target = match DeleteAction::new(id).run(&AssumeYes, &state.chat_service).await? {
        DeleteOutcome::Deleted(mutation) => mutation.navigate_to,
        DeleteOutcome::Cancelled => View::Detail(id),
    };
    Ok(Redirect::to(&target.path()).into_response())
}

async fn submit(state: &AppState, mut form: ChatForm) -> Result<Response, AppError> {
    match form.submit(&state.chat_service).await {
        Ok(mutation) => Ok(Redirect::to(&mutation.navigate_to.path()).into_response()),
        Err(FormError::Chat(ChatError::Validation(_))) => {
            let page = render_form(state, &form)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn render_form(state: &AppState, form: &ChatForm) -> Result<String, AppError> {
    let (heading, action) = match form.mode() {
        FormMode::Create => ("Create New Chat", "/chats".to_string()),
        FormMode::Edit(id) => ("Edit Chat", View::Detail(id).path()),
    };

    let mut ctx = tera::Context::new();
    ctx.insert("heading", heading);
    ctx.insert("action", &action);
    ctx.insert("guest", form.guest());
    ctx.insert("chat_date", form.chat_date());
    ctx.insert("notes", form.notes());
    ctx.insert("save_label", form.save_label());
    ctx.insert("cancel_href", &form.cancel().path());
    ctx.insert("error", &form.last_error().map(ToString::to_string));
    Ok(state.tera.render("form.html", &ctx)?)
}
