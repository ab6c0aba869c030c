//! In-process chat store.
//!
//! `InMemoryChatRepository` behaves like the remote backend (ids assigned
//! from 1, 404 on unknown ids) without a network. It counts every call so
//! callers can assert that an operation never reached the store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::Mutex;

use coffeechat_types::chat::{Chat, ChatDraft, ChatId};
use coffeechat_types::error::RemoteError;

use crate::repository::chat::ChatRepository;

#[derive(Debug)]
struct Store {
    next_id: i64,
    chats: BTreeMap<ChatId, Chat>,
}

#[derive(Debug)]
pub struct InMemoryChatRepository {
    store: Mutex<Store>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start assigning ids at `next_id`.
    pub fn starting_at(next_id: i64) -> Self {
        Self {
            store: Mutex::new(Store {
                next_id,
                chats: BTreeMap::new(),
            }),
            calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Number of repository calls made so far, successful or not.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with HTTP 503 (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn enter(&self, method: &str, path: &str) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(status(method, path, 503));
        }
        Ok(())
    }
}

fn status(method: &str, path: &str, status: u16) -> RemoteError {
    RemoteError::Status {
        method: method.to_string(),
        url: format!("memory:{path}"),
        status,
    }
}

impl ChatRepository for InMemoryChatRepository {
    async fn create(&self, draft: &ChatDraft) -> Result<Chat, RemoteError> {
        self.enter("POST", "/api/chats")?;
        let mut store = self.store.lock().await;
        let id = ChatId(store.next_id);
        store.next_id += 1;
        let chat = Chat {
            id,
            guest: draft.guest.clone(),
            chat_date: draft.chat_date.clone(),
            notes: draft.notes.clone(),
        };
        store.chats.insert(id, chat.clone());
        Ok(chat)
    }

    async fn list(&self) -> Result<Vec<Chat>, RemoteError> {
        self.enter("GET", "/api/chats")?;
        let store = self.store.lock().await;
        Ok(store.chats.values().cloned().collect())
    }

    async fn get(&self, id: ChatId) -> Result<Chat, RemoteError> {
        let path = format!("/api/chats/{id}");
        self.enter("GET", &path)?;
        let store = self.store.lock().await;
        store
            .chats
            .get(&id)
            .cloned()
            .ok_or_else(|| status("GET", &path, 404))
    }

    async fn update(&self, id: ChatId, draft: &ChatDraft) -> Result<(), RemoteError> {
        let path = format!("/api/chats/{id}");
        self.enter("PUT", &path)?;
        let mut store = self.store.lock().await;
        let chat = store
            .chats
            .get_mut(&id)
            .ok_or_else(|| status("PUT", &path, 404))?;
        chat.guest = draft.guest.clone();
        chat.chat_date = draft.chat_date.clone();
        chat.notes = draft.notes.clone();
        Ok(())
    }

    async fn delete(&self, id: ChatId) -> Result<(), RemoteError> {
        let path = format!("/api/chats/{id}");
        self.enter("DELETE", &path)?;
        let mut store = self.store.lock().await;
        store
            .chats
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| status("DELETE", &path, 404))
    }
}
