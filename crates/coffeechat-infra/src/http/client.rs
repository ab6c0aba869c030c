//! HttpChatRepository -- concrete [`ChatRepository`] over the chat REST API.
//!
//! Talks to `{base_url}/api/chats` with JSON bodies. When credentials are
//! configured every request carries `Authorization: Basic ...`; otherwise no
//! credential header is sent. Which of the two applies is decided once, at
//! construction.
//!
//! The password is held in a [`SecretString`] and never logged.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use coffeechat_core::repository::chat::ChatRepository;
use coffeechat_types::chat::{Chat, ChatDraft, ChatId};
use coffeechat_types::error::RemoteError;

const CHATS_PATH: &str = "/api/chats";

/// Static username/password pair sent with every request.
#[derive(Debug)]
pub struct BasicCredentials {
    pub username: String,
    pub password: SecretString,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Everything the client needs, resolved before construction.
#[derive(Debug)]
pub struct ClientSettings {
    pub base_url: String,
    pub credentials: Option<BasicCredentials>,
    /// `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl ClientSettings {
    /// Settings for an unauthenticated backend.
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            timeout: None,
        }
    }
}

/// Chat repository backed by the remote REST API.
pub struct HttpChatRepository {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<BasicCredentials>,
}

impl HttpChatRepository {
    pub fn new(settings: ClientSettings) -> Result<Self, RemoteError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RemoteError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credentials: settings.credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry the static credential header.
    pub fn is_credentialed(&self) -> bool {
        self.credentials.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn item_path(id: ChatId) -> String {
        format!("{CHATS_PATH}/{id}")
    }

    /// Start a request with the credential header (if any) attached.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(creds.password.expose_secret()));
        }
        if method != Method::GET {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        request
    }

    /// Send and turn any non-2xx status into [`RemoteError::Status`].
    async fn send(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Response, RemoteError> {
        let url = self.url(path);
        let response = request.send().await.map_err(|e| {
            tracing::debug!(%method, %url, error = %e, "chat backend unreachable");
            RemoteError::Transport(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "chat backend responded");

        if !status.is_success() {
            return Err(RemoteError::Status {
                method: method.to_string(),
                url,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

impl ChatRepository for HttpChatRepository {
    async fn create(&self, draft: &ChatDraft) -> Result<Chat, RemoteError> {
        let request = self.request(Method::POST, CHATS_PATH).json(draft);
        let response = self.send(Method::POST, CHATS_PATH, request).await?;
        Self::decode(response).await
    }

    async fn list(&self) -> Result<Vec<Chat>, RemoteError> {
        let request = self.request(Method::GET, CHATS_PATH);
        let response = self.send(Method::GET, CHATS_PATH, request).await?;
        // Some deployments answer `null` for an empty table.
        let chats: Option<Vec<Chat>> = Self::decode(response).await?;
        Ok(chats.unwrap_or_default())
    }

    async fn get(&self, id: ChatId) -> Result<Chat, RemoteError> {
        let path = Self::item_path(id);
        let request = self.request(Method::GET, &path);
        let response = self.send(Method::GET, &path, request).await?;
        Self::decode(response).await
    }

    async fn update(&self, id: ChatId, draft: &ChatDraft) -> Result<(), RemoteError> {
        let path = Self::item_path(id);
        let request = self.request(Method::PUT, &path).json(draft);
        self.send(Method::PUT, &path, request).await?;
        Ok(())
    }

    async fn delete(&self, id: ChatId) -> Result<(), RemoteError> {
        let path = Self::item_path(id);
        let request = self.request(Method::DELETE, &path);
        self.send(Method::DELETE, &path, request).await?;
        Ok(())
    }
}
