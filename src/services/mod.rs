//! Collaborator contracts the components consume.
//!
//! Each trait mirrors one backend resource. [`http::HttpBackend`] talks to the
//! remote REST API; [`local::LocalStore`] keeps the uniqueness-constrained
//! entities (favorites, recently viewed) in `SQLite`.

/// Remote REST backend built on `reqwest`
pub mod http;
/// `SeaORM`-backed store for favorites and recently-viewed rows
pub mod local;

use crate::{
    errors::Result,
    models::{
        FavoriteRecord, ForecastRequest, ForecastResponse, Home, NewFavorite, Task,
        TaskGenerationRequest,
    },
};
use async_trait::async_trait;
use std::sync::Arc;

pub use http::HttpBackend;
pub use local::LocalStore;

#[async_trait]
pub trait FavoritesService: Send + Sync {
    /// Returns every favorite stored for `user_id`.
    async fn fetch_favorites(&self, user_id: &str) -> Result<Vec<FavoriteRecord>>;

    async fn add_favorite(&self, favorite: &NewFavorite) -> Result<()>;

    /// Deletes one favorite by its record id.
    async fn remove_favorite(&self, record_id: &str) -> Result<()>;
}

#[async_trait]
pub trait TaskService: Send + Sync {
    async fn fetch_tasks(&self, user_id: &str) -> Result<Vec<Task>>;

    /// Regenerates the full task list for a user.
    async fn generate_tasks(&self, request: &TaskGenerationRequest) -> Result<Vec<Task>>;

    async fn delete_task(&self, task_id: &str) -> Result<()>;
}

#[async_trait]
pub trait ForecastService: Send + Sync {
    async fn request_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse>;
}

#[async_trait]
pub trait RecentlyViewedService: Send + Sync {
    /// Insert-or-refresh keyed by `(user_id, home_id)`.
    async fn upsert_view(&self, user_id: &str, home_id: &str) -> Result<()>;
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn search_homes(&self, query: &str) -> Result<Vec<Home>>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Sends one user message and returns the assistant's reply.
    async fn send_message(&self, message: &str) -> Result<String>;
}

/// The set of collaborators wired at startup and shared by every command.
#[derive(Clone)]
pub struct Services {
    pub favorites: Arc<dyn FavoritesService>,
    pub tasks: Arc<dyn TaskService>,
    pub forecast: Arc<dyn ForecastService>,
    pub recently_viewed: Arc<dyn RecentlyViewedService>,
    pub catalog: Arc<dyn CatalogService>,
    pub chat: Arc<dyn ChatService>,
}

impl Services {
    /// Routes every collaborator to the remote backend.
    #[must_use]
    pub fn remote(backend: HttpBackend) -> Self {
        let backend = Arc::new(backend);
        Self {
            favorites: Arc::clone(&backend) as Arc<dyn FavoritesService>,
            tasks: Arc::clone(&backend) as Arc<dyn TaskService>,
            forecast: Arc::clone(&backend) as Arc<dyn ForecastService>,
            recently_viewed: Arc::clone(&backend) as Arc<dyn RecentlyViewedService>,
            catalog: Arc::clone(&backend) as Arc<dyn CatalogService>,
            chat: backend,
        }
    }

    /// Keeps favorites and recently-viewed rows in the local store; the rest stays remote.
    #[must_use]
    pub fn with_local_store(backend: HttpBackend, store: LocalStore) -> Self {
        let store = Arc::new(store);
        Self {
            favorites: Arc::clone(&store) as Arc<dyn FavoritesService>,
            recently_viewed: store,
            ..Self::remote(backend)
        }
    }
}
