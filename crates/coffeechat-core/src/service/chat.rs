//! Chat service: validation, invalidation and navigation targets.
//!
//! Wraps a [`ChatRepository`] with the consistency rules of the UI:
//! drafts are checked before any network call, successful mutations mark
//! the affected views stale, and every mutation tells the caller which view
//! to show next. The service itself never navigates.

use coffeechat_types::chat::{Chat, ChatDraft, ChatId};
use coffeechat_types::error::ChatError;
use coffeechat_types::view::View;

use crate::cache::ViewCache;
use crate::repository::chat::ChatRepository;

/// Result of a successful create, update or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// The record the backend returned, when it returns one (create only).
    pub chat: Option<Chat>,
    /// Where the host should take the user next.
    pub navigate_to: View,
}

/// Service orchestrating chat reads and writes.
///
/// Generic over the repository and the view cache so the same rules apply
/// to the HTTP client and the in-memory store.
pub struct ChatService<R: ChatRepository, C: ViewCache> {
    repo: R,
    cache: C,
}

impl<R: ChatRepository, C: ViewCache> ChatService<R, C> {
    pub fn new(repo: R, cache: C) -> Self {
        Self { repo, cache }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Validate and store a new chat, then send the user to the listing.
    pub async fn create(&self, draft: &ChatDraft) -> Result<Mutation, ChatError> {
        draft.validate()?;

        let chat = self.repo.create(draft).await.map_err(|e| {
            tracing::warn!(error = %e, "failed to create chat");
            e
        })?;
        tracing::info!(id = %chat.id, guest = %chat.guest, "chat created");

        self.cache.invalidate(View::Listing);
        Ok(Mutation {
            chat: Some(chat),
            navigate_to: View::Listing,
        })
    }

    /// Fetch every chat, always from the backend.
    pub async fn list(&self) -> Result<Vec<Chat>, ChatError> {
        let chats = self.repo.list().await?;
        self.cache.mark_fresh(View::Listing);
        Ok(chats)
    }

    /// Fetch one chat, always from the backend.
    pub async fn get(&self, id: ChatId) -> Result<Chat, ChatError> {
        let chat = self.repo.get(id).await?;
        self.cache.mark_fresh(View::Detail(id));
        Ok(chat)
    }

    /// Validate and replace a chat, then send the user to its detail view.
    pub async fn update(&self, id: ChatId, draft: &ChatDraft) -> Result<Mutation, ChatError> {
        draft.validate()?;

        self.repo.update(id, draft).await.map_err(|e| {
            tracing::warn!(%id, error = %e, "failed to update chat");
            e
        })?;
        tracing::info!(%id, "chat updated");

        self.cache.invalidate(View::Listing);
        self.cache.invalidate(View::Detail(id));
        Ok(Mutation {
            chat: None,
            navigate_to: View::Detail(id),
        })
    }

    /// Remove a chat, then send the user to the listing.
    pub async fn delete(&self, id: ChatId) -> Result<Mutation, ChatError> {
        self.repo.delete(id).await.map_err(|e| {
            tracing::warn!(%id, error = %e, "failed to delete chat");
            e
        })?;
        tracing::info!(%id, "chat deleted");

        self.cache.invalidate(View::Listing);
        self.cache.invalidate(View::Detail(id));
        Ok(Mutation {
            chat: None,
            navigate_to: View::Listing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryViewCache;
    use crate::memory::InMemoryChatRepository;
    use coffeechat_types::chat::ChatField;
    use coffeechat_types::error::ValidationError;

    fn service() -> ChatService<InMemoryChatRepository, InMemoryViewCache> {
        ChatService::new(InMemoryChatRepository::new(), InMemoryViewCache::new())
    }

    fn ana() -> ChatDraft {
        ChatDraft::new("Ana", "2024-03-01", "intro call")
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_without_calling_backend() {
        let svc = service();
        for draft in [
            ChatDraft::new("", "2024-03-01", "intro call"),
            ChatDraft::new("Ana", "", "intro call"),
            ChatDraft::new("Ana", "2024-03-01", ""),
        ] {
            let err = svc.create(&draft).await.unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
        }
        assert_eq!(svc.repository().call_count(), 0);
        assert!(!svc.cache().is_stale(View::Listing));
    }

    #[tokio::test]
    async fn update_rejects_missing_fields_without_calling_backend() {
        let svc = service();
        let err = svc
            .update(ChatId(1), &ChatDraft::new("Ana", "", "x"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ChatError::Validation(ValidationError::MissingField(ChatField::ChatDate))
        );
        assert_eq!(svc.repository().call_count(), 0);
    }

    #[tokio::test]
    async fn list_on_empty_backend_is_empty() {
        let svc = service();
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_invalidates_listing_and_navigates_there() {
        let svc = service();
        svc.list().await.unwrap();

        let mutation = svc.create(&ana()).await.unwrap();
        assert_eq!(mutation.navigate_to, View::Listing);
        assert!(svc.cache().is_stale(View::Listing));

        let chats = svc.list().await.unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(Some(&chats[0]), mutation.chat.as_ref());
        assert!(!svc.cache().is_stale(View::Listing));
    }

    #[tokio::test]
    async fn create_then_get_returns_same_record() {
        let svc = ChatService::new(
            InMemoryChatRepository::starting_at(7),
            InMemoryViewCache::new(),
        );
        let created = svc.create(&ana()).await.unwrap().chat.unwrap();
        assert_eq!(created.id, ChatId(7));

        let fetched = svc.get(ChatId(7)).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.display_date(), "03/01/2024");
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let svc = service();
        let created = svc.create(&ana()).await.unwrap().chat.unwrap();
        svc.get(created.id).await.unwrap();

        let mutation = svc
            .update(created.id, &ChatDraft::new("Ana B.", "2024-04-02", "second call"))
            .await
            .unwrap();
        assert_eq!(mutation.navigate_to, View::Detail(created.id));
        assert!(svc.cache().is_stale(View::Listing));
        assert!(svc.cache().is_stale(View::Detail(created.id)));

        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.guest, "Ana B.");
        assert_eq!(fetched.chat_date, "2024-04-02");
        assert_eq!(fetched.notes, "second call");
        assert!(!svc.cache().is_stale(View::Detail(created.id)));
    }

    #[tokio::test]
    async fn delete_then_get_is_remote_error() {
        let svc = service();
        let created = svc.create(&ana()).await.unwrap().chat.unwrap();

        let mutation = svc.delete(created.id).await.unwrap();
        assert_eq!(mutation.navigate_to, View::Listing);

        let err = svc.get(created.id).await.unwrap_err();
        match err {
            ChatError::Remote(remote) => assert!(remote.is_not_found()),
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_mutation_invalidates_nothing() {
        let svc = service();
        svc.repository().set_unavailable(true);

        let err = svc.create(&ana()).await.unwrap_err();
        assert!(matches!(err, ChatError::Remote(_)));
        let err = svc.delete(ChatId(1)).await.unwrap_err();
        assert!(matches!(err, ChatError::Remote(_)));
        assert!(svc.cache().stale_views().is_empty());
    }
}
