//! ChatRepository trait definition.

use coffeechat_types::chat::{Chat, ChatDraft, ChatId};
use coffeechat_types::error::RemoteError;

/// Repository trait for the remote chat store.
///
/// Each method is exactly one round trip. Implementations do no validation,
/// no caching and no retries: any non-success answer is a [`RemoteError`].
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Store a new chat. The backend assigns the id.
    fn create(
        &self,
        draft: &ChatDraft,
    ) -> impl std::future::Future<Output = Result<Chat, RemoteError>> + Send;

    /// Fetch every chat. An empty store yields an empty vector.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Chat>, RemoteError>> + Send;

    /// Fetch one chat. A missing record is an error, not `None`.
    fn get(
        &self,
        id: ChatId,
    ) -> impl std::future::Future<Output = Result<Chat, RemoteError>> + Send;

    /// Replace all mutable fields of a chat.
    fn update(
        &self,
        id: ChatId,
        draft: &ChatDraft,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    /// Remove a chat.
    fn delete(&self, id: ChatId)
    -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;
}
