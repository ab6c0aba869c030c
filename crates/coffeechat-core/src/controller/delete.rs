//! Delete action controller.
//!
//! Deleting is a single action gated on an explicit confirmation. The host
//! supplies the [`Confirmer`] (a terminal prompt, a browser dialog result,
//! or [`AssumeYes`] for `--force`).

use coffeechat_types::chat::ChatId;
use coffeechat_types::error::ChatError;

use crate::cache::ViewCache;
use crate::repository::chat::ChatRepository;
use crate::service::chat::{ChatService, Mutation};

/// Asks the user to confirm a destructive action.
pub trait Confirmer {
    /// Returns true only on an explicit yes.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined. Nothing was sent and nobody navigates.
    Cancelled,
    Deleted(Mutation),
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteAction {
    id: ChatId,
}

impl DeleteAction {
    pub const PROMPT: &'static str = "Are you sure you want to delete this chat?";

    pub fn new(id: ChatId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ChatId {
        self.id
    }

    pub async fn run<R, C>(
        &self,
        confirmer: &impl Confirmer,
        service: &ChatService<R, C>,
    ) -> Result<DeleteOutcome, ChatError>
    where
        R: ChatRepository,
        C: ViewCache,
    {
        if !confirmer.confirm(Self::PROMPT) {
            tracing::debug!(id = %self.id, "delete declined");
            return Ok(DeleteOutcome::Cancelled);
        }
        let mutation = service.delete(self.id).await?;
        Ok(DeleteOutcome::Deleted(mutation))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::cache::InMemoryViewCache;
    use crate::memory::InMemoryChatRepository;
    use coffeechat_types::chat::ChatDraft;
    use coffeechat_types::view::View;

    struct Scripted {
        answer: bool,
        asked: RefCell<Vec<String>>,
    }

    impl Confirmer for Scripted {
        fn confirm(&self, prompt: &str) -> bool {
            self.asked.borrow_mut().push(prompt.to_string());
            self.answer
        }
    }

    fn scripted(answer: bool) -> Scripted {
        Scripted {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }

    async fn seeded() -> (ChatService<InMemoryChatRepository, InMemoryViewCache>, ChatId) {
        let svc = ChatService::new(InMemoryChatRepository::new(), InMemoryViewCache::new());
        let chat = svc
            .create(&ChatDraft::new("Ana", "2024-03-01", "intro call"))
            .await
            .unwrap()
            .chat
            .unwrap();
        (svc, chat.id)
    }

    #[tokio::test]
    async fn declining_makes_no_calls() {
        let (svc, id) = seeded().await;
        let calls_before = svc.repository().call_count();
        let confirmer = scripted(false);

        let outcome = DeleteAction::new(id).run(&confirmer, &svc).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(svc.repository().call_count(), calls_before);
        assert_eq!(confirmer.asked.borrow().as_slice(), [DeleteAction::PROMPT]);
    }

    #[tokio::test]
    async fn confirming_deletes_and_navigates_to_listing() {
        let (svc, id) = seeded().await;

        let outcome = DeleteAction::new(id).run(&scripted(true), &svc).await.unwrap();
        match outcome {
            DeleteOutcome::Deleted(mutation) => assert_eq!(mutation.navigate_to, View::Listing),
            other => panic!("expected deletion, got {other:?}"),
        }
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn assume_yes_skips_the_prompt() {
        let (svc, id) = seeded().await;
        let outcome = DeleteAction::new(id).run(&AssumeYes, &svc).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted(_)));
    }

    #[tokio::test]
    async fn deleting_missing_chat_is_remote_error() {
        let (svc, _) = seeded().await;
        let err = DeleteAction::new(ChatId(404)).run(&AssumeYes, &svc).await.unwrap_err();
        assert!(matches!(err, ChatError::Remote(_)));
    }
}
