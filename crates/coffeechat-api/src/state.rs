//! Application state wiring the chat service together.
//!
//! AppState holds the concrete service used by both the CLI and the web
//! front-end. `ChatService` is generic over the repository and view cache;
//! AppState pins it to the HTTP client and the in-memory cache.

use std::path::Path;
use std::sync::Arc;

use coffeechat_core::cache::InMemoryViewCache;
use coffeechat_core::service::chat::ChatService;
use coffeechat_infra::config::load_client_settings;
use coffeechat_infra::http::{ClientSettings, HttpChatRepository};
use tera::Tera;

pub type ConcreteChatService = ChatService<HttpChatRepository, Arc<InMemoryViewCache>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub cache: Arc<InMemoryViewCache>,
    pub tera: Arc<Tera>,
}

impl AppState {
    /// Resolve configuration and build the HTTP-backed service.
    pub async fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let settings = load_client_settings(config_path).await?;
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: ClientSettings) -> anyhow::Result<Self> {
        let repo = HttpChatRepository::new(settings)?;
        tracing::debug!(
            base_url = repo.base_url(),
            credentialed = repo.is_credentialed(),
            "chat repository ready"
        );

        let cache = Arc::new(InMemoryViewCache::new());
        let chat_service = ChatService::new(repo, Arc::clone(&cache));

        Ok(Self {
            chat_service: Arc::new(chat_service),
            cache,
            tera: Arc::new(load_templates()?),
        })
    }

    pub fn base_url(&self) -> &str {
        self.chat_service.repository().base_url()
    }
}

/// Page templates compiled into the binary.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("listing.html", include_str!("../templates/listing.html")),
        ("detail.html", include_str!("../templates/detail.html")),
        ("form.html", include_str!("../templates/form.html")),
    ])?;
    Ok(tera)
}
