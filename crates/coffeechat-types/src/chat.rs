//! Chat record and draft payload types.
//!
//! A `Chat` is the single entity stored by the backend. A `ChatDraft` is the
//! `{guest, chat_date, notes}` shape sent on create and update; it never
//! carries an id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Server-assigned identifier of a chat record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A coffee chat as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    /// Name of the person the chat was with.
    pub guest: String,
    /// ISO `YYYY-MM-DD`, stored and transmitted verbatim.
    pub chat_date: String,
    pub notes: String,
}

impl Chat {
    /// The chat date formatted for display (`MM/DD/YYYY`).
    pub fn display_date(&self) -> String {
        display_date(&self.chat_date)
    }

    /// Copy the mutable fields into a draft, e.g. to seed an edit form.
    pub fn to_draft(&self) -> ChatDraft {
        ChatDraft {
            guest: self.guest.clone(),
            chat_date: self.chat_date.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Payload for create and full-record update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatDraft {
    pub guest: String,
    pub chat_date: String,
    pub notes: String,
}

impl ChatDraft {
    pub fn new(
        guest: impl Into<String>,
        chat_date: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            guest: guest.into(),
            chat_date: chat_date.into(),
            notes: notes.into(),
        }
    }

    /// Presence check on every field. Values are not altered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            (ChatField::Guest, &self.guest),
            (ChatField::ChatDate, &self.chat_date),
            (ChatField::Notes, &self.notes),
        ] {
            if value.is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }
        Ok(())
    }
}

/// The user-editable fields of a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatField {
    Guest,
    ChatDate,
    Notes,
}

impl fmt::Display for ChatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatField::Guest => write!(f, "guest"),
            ChatField::ChatDate => write!(f, "chat date"),
            ChatField::Notes => write!(f, "notes"),
        }
    }
}

/// Reformat an ISO `YYYY-MM-DD` date as `MM/DD/YYYY`.
///
/// Anything that does not parse as an ISO date is returned unchanged.
pub fn display_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%m/%d/%Y").to_string(),
        Err(_) => iso.to_string(),
    }
}
