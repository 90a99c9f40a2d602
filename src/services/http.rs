//! HTTP client for the remote backend.
//!
//! Stateless: no business logic lives here, only request construction and
//! status/body mapping into [`Error`].

use super::{
    CatalogService, ChatService, FavoritesService, ForecastService, RecentlyViewedService,
    TaskService,
};
use crate::{
    config::settings::{Endpoints, ServicesConfig},
    errors::{Error, Result},
    models::{
        FavoriteRecord, ForecastRequest, ForecastResponse, Home, NewFavorite, Task,
        TaskGenerationRequest,
    },
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct FavoritesEnvelope {
    #[serde(default)]
    favorites: Vec<FavoriteRecord>,
}

#[derive(Debug, Deserialize)]
struct TasksEnvelope {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<Home>,
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Debug, Serialize)]
struct ViewBody<'a> {
    #[serde(rename = "userId")]
    user_id: &'a str,
    #[serde(rename = "homeId")]
    home_id: &'a str,
}

/// Remote backend client; one base address per collaborator.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    /// Builds a client with the configured timeout.
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            endpoints: config.endpoints(),
        })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Maps a response into `T`, translating failure statuses.
    async fn decode<T: DeserializeOwned>(response: Response, resource: &'static str) -> Result<T> {
        let response = Self::check(response, resource).await?;
        let status = response.status();
        let body = response.bytes().await?;
        parse_body(status, &body)
    }

    /// Fails on any non-success status.
    async fn check(response: Response, resource: &'static str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(status_error(status, &url, body, resource))
    }
}

/// Error for a non-success status: 404 becomes [`Error::NotFound`] keyed by the
/// last path segment, anything else [`Error::Service`] carrying the body text.
fn status_error(status: StatusCode, url: &Url, body: String, resource: &'static str) -> Error {
    if status == StatusCode::NOT_FOUND {
        let id = url
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .unwrap_or_default();
        return Error::NotFound { resource, id };
    }
    Error::Service {
        status: status.as_u16(),
        message: body,
    }
}

/// Decodes a success body; a body that does not match `T` is a service fault.
fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::Service {
        status: status.as_u16(),
        message: format!("Malformed response body: {e}"),
    })
}

/// Joins a base address and a path segment that may need escaping.
fn resource_url(base: &str, collection: &str, id: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{base}/{collection}")).map_err(|e| Error::Config {
        message: format!("Invalid service address '{base}': {e}"),
    })?;
    url.path_segments_mut()
        .map_err(|()| Error::Config {
            message: format!("Service address '{base}' cannot carry a path"),
        })?
        .push(id);
    Ok(url)
}

#[async_trait]
impl FavoritesService for HttpBackend {
    #[instrument(skip(self))]
    async fn fetch_favorites(&self, user_id: &str) -> Result<Vec<FavoriteRecord>> {
        let url = format!("{}/favorites", self.endpoints.favorites);
        let response = self
            .http
            .get(&url)
            .query(&[("userId", user_id)])
            .send()
            .await?;
        let body: FavoritesEnvelope = Self::decode(response, "favorites").await?;
        debug!("Fetched {} favorites", body.favorites.len());
        Ok(body.favorites)
    }

    #[instrument(skip(self, favorite), fields(home_ref = %favorite.home_ref))]
    async fn add_favorite(&self, favorite: &NewFavorite) -> Result<()> {
        let url = format!("{}/favorites", self.endpoints.favorites);
        let response = self.http.post(&url).json(favorite).send().await?;
        Self::check(response, "favorite").await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_favorite(&self, record_id: &str) -> Result<()> {
        let url = resource_url(&self.endpoints.favorites, "favorites", record_id)?;
        let response = self.http.delete(url).send().await?;
        Self::check(response, "favorite").await?;
        Ok(())
    }
}

#[async_trait]
impl TaskService for HttpBackend {
    #[instrument(skip(self))]
    async fn fetch_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        let url = format!("{}/tasks", self.endpoints.tasks);
        let response = self
            .http
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        let body: TasksEnvelope = Self::decode(response, "tasks").await?;
        Ok(body.tasks)
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    async fn generate_tasks(&self, request: &TaskGenerationRequest) -> Result<Vec<Task>> {
        let url = format!("{}/tasks/generate", self.endpoints.tasks);
        let response = self.http.post(&url).json(request).send().await?;
        let body: TasksEnvelope = Self::decode(response, "tasks").await?;
        debug!("Task service generated {} tasks", body.tasks.len());
        Ok(body.tasks)
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, task_id: &str) -> Result<()> {
        let url = resource_url(&self.endpoints.tasks, "tasks", task_id)?;
        let response = self.http.delete(url).send().await?;
        Self::check(response, "task").await?;
        Ok(())
    }
}

#[async_trait]
impl ForecastService for HttpBackend {
    #[instrument(skip(self))]
    async fn request_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        let url = format!("{}/forecast", self.endpoints.forecast);
        let response = self.http.post(&url).json(request).send().await?;
        Self::decode(response, "forecast").await
    }
}

#[async_trait]
impl RecentlyViewedService for HttpBackend {
    #[instrument(skip(self))]
    async fn upsert_view(&self, user_id: &str, home_id: &str) -> Result<()> {
        let url = format!("{}/recently-viewed", self.endpoints.recently_viewed);
        let response = self
            .http
            .post(&url)
            .json(&ViewBody { user_id, home_id })
            .send()
            .await?;
        Self::check(response, "recently viewed").await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogService for HttpBackend {
    #[instrument(skip(self))]
    async fn search_homes(&self, query: &str) -> Result<Vec<Home>> {
        let url = format!("{}/search", self.endpoints.catalog);
        let response = self.http.get(&url).query(&[("q", query)]).send().await?;
        let body: SearchEnvelope = Self::decode(response, "search").await?;
        Ok(body.results)
    }
}

#[async_trait]
impl ChatService for HttpBackend {
    #[instrument(skip(self, message))]
    async fn send_message(&self, message: &str) -> Result<String> {
        let url = format!("{}/chat", self.endpoints.chat);
        let response = self.http.post(&url).json(&ChatBody { message }).send().await?;
        let body: ChatReply = Self::decode(response, "chat").await?;
        debug!("Chat reply of {} chars", body.reply.len());
        Ok(body.reply)
    }
}
