//! CLI handlers for chat commands.
//!
//! Each handler drives the same controllers the web pages use: `ChatForm`
//! for new/edit, `DeleteAction` for delete. After a successful mutation the
//! handler renders whichever view the service navigated to.

use anyhow::{bail, Result};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use coffeechat_core::controller::delete::{AssumeYes, Confirmer, DeleteAction, DeleteOutcome};
use coffeechat_core::controller::form::ChatForm;
use coffeechat_core::service::chat::Mutation;
use coffeechat_types::chat::{Chat, ChatField, ChatId};
use coffeechat_types::error::{ChatError, FormError, ValidationError};
use coffeechat_types::view::View;

use crate::cli::FieldArgs;
use crate::state::AppState;

/// Asks on the terminal. Anything but an explicit yes declines.
struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        match Confirm::new().with_prompt(prompt).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "confirmation prompt failed, treating as no");
                false
            }
        }
    }
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    Ok(spinner)
}

/// List every chat as a table.
pub async fn list_chats(state: &AppState, json: bool) -> Result<()> {
    let chats = state.chat_service.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chats)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("Coffee Chats").bold());
    println!();

    if chats.is_empty() {
        println!(
            "  {} No chats yet. Record one with: {}",
            style("i").blue().bold(),
            style("coffeechat new").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Date").fg(Color::White),
        Cell::new("Guest").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for chat in &chats {
        table.add_row(vec![
            Cell::new(chat.display_date()),
            Cell::new(&chat.guest).fg(Color::Cyan),
            Cell::new(chat.id).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} chat{}",
        chats.len(),
        if chats.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show one chat.
pub async fn show_chat(state: &AppState, id: ChatId, json: bool) -> Result<()> {
    let chat = state.chat_service.get(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chat)?);
        return Ok(());
    }

    print_chat(&chat);
    Ok(())
}

fn print_chat(chat: &Chat) {
    println!();
    println!(
        "  {} {}",
        style("Chat").bold(),
        style(format!("#{}", chat.id)).dim()
    );
    println!();
    println!("  {:<8} {}", style("Guest").dim(), style(&chat.guest).cyan());
    println!("  {:<8} {}", style("Date").dim(), chat.display_date());
    println!("  {:<8} {}", style("Notes").dim(), chat.notes);
    println!();
}

/// Record a new chat.
///
/// Fields missing from the flags are prompted for, unless `--json` is set.
pub async fn new_chat(state: &AppState, fields: FieldArgs, json: bool) -> Result<()> {
    let mut form = ChatForm::create();
    let interactive = !json;

    for field in [ChatField::Guest, ChatField::ChatDate, ChatField::Notes] {
        match field_arg(&fields, field) {
            Some(value) => set_field(&mut form, field, value.to_string()),
            None if interactive => prompt_field(&mut form, field)?,
            None => {}
        }
    }

    let mutation = submit(state, &mut form, interactive).await?;
    follow(state, mutation, json).await
}

/// Edit an existing chat.
///
/// With no field flags and a terminal, every field is prompted for,
/// prefilled with the stored value.
pub async fn edit_chat(state: &AppState, id: ChatId, fields: FieldArgs, json: bool) -> Result<()> {
    let chat = state.chat_service.get(id).await?;
    let mut form = ChatForm::edit(&chat);
    let interactive = !json;
    let any_flag = fields.guest.is_some() || fields.date.is_some() || fields.notes.is_some();

    for field in [ChatField::Guest, ChatField::ChatDate, ChatField::Notes] {
        match field_arg(&fields, field) {
            Some(value) => set_field(&mut form, field, value.to_string()),
            None if interactive && !any_flag => prompt_field(&mut form, field)?,
            None => {}
        }
    }

    let mutation = submit(state, &mut form, interactive).await?;
    follow(state, mutation, json).await
}

/// Delete a chat after confirmation.
pub async fn delete_chat(state: &AppState, id: ChatId, force: bool, json: bool) -> Result<()> {
    if json && !force {
        bail!("refusing to prompt in --json mode; pass --force to delete chat {id}");
    }

    let action = DeleteAction::new(id);
    let outcome = if force {
        action.run(&AssumeYes, &state.chat_service).await?
    } else {
        action.run(&TerminalConfirmer, &state.chat_service).await?
    };

    match outcome {
        DeleteOutcome::Cancelled => {
            println!("  Cancelled.");
            Ok(())
        }
        DeleteOutcome::Deleted(mutation) => {
            if !json {
                println!("  {} Chat {} deleted.", style("✓").red().bold(), id);
            }
            follow(state, mutation, json).await
        }
    }
}

fn field_arg(fields: &FieldArgs, field: ChatField) -> Option<&str> {
    match field {
        ChatField::Guest => fields.guest.as_deref(),
        ChatField::ChatDate => fields.date.as_deref(),
        ChatField::Notes => fields.notes.as_deref(),
    }
}

fn current_value(form: &ChatForm, field: ChatField) -> &str {
    match field {
        ChatField::Guest => form.guest(),
        ChatField::ChatDate => form.chat_date(),
        ChatField::Notes => form.notes(),
    }
}

fn set_field(form: &mut ChatForm, field: ChatField, value: String) {
    match field {
        ChatField::Guest => form.set_guest(value),
        ChatField::ChatDate => form.set_chat_date(value),
        ChatField::Notes => form.set_notes(value),
    }
}

fn prompt_field(form: &mut ChatForm, field: ChatField) -> Result<()> {
    let label = match field {
        ChatField::Guest => "Guest",
        ChatField::ChatDate => "Chat date (YYYY-MM-DD)",
        ChatField::Notes => "Notes",
    };

    let mut input = Input::<String>::new().with_prompt(label).allow_empty(true);
    let current = current_value(form, field);
    if !current.is_empty() {
        input = input.with_initial_text(current);
    }

    let value = input.interact_text()?;
    set_field(form, field, value);
    Ok(())
}

/// Submit the form, re-prompting for a missing field on a terminal.
async fn submit(state: &AppState, form: &mut ChatForm, interactive: bool) -> Result<Mutation> {
    loop {
        let spinner = spinner("Saving...")?;
        let result = form.submit(&state.chat_service).await;
        spinner.finish_and_clear();

        match result {
            Ok(mutation) => return Ok(mutation),
            Err(FormError::Chat(ChatError::Validation(ValidationError::MissingField(field))))
                if interactive =>
            {
                println!("  {} {} is required.", style("!").yellow().bold(), field);
                prompt_field(form, field)?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Render the view a mutation navigated to.
async fn follow(state: &AppState, mutation: Mutation, json: bool) -> Result<()> {
    if json {
        let out = serde_json::json!({
            "chat": mutation.chat,
            "navigate_to": mutation.navigate_to.path(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(chat) = &mutation.chat {
        println!(
            "  {} Saved chat with {}.",
            style("✓").green().bold(),
            style(&chat.guest).cyan()
        );
    }

    match mutation.navigate_to {
        View::Listing => list_chats(state, false).await,
        View::Detail(id) => show_chat(state, id, false).await,
        // Mutations never navigate to a form.
        View::New | View::Edit(_) => Ok(()),
    }
}
