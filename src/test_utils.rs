//! Shared test utilities for `HomeBuddy`.
//!
//! In-memory collaborators that count their calls, so tests can assert that a
//! rejected operation never reached the network, plus an in-memory `SQLite` setup
//! for the local store.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use crate::{
    auth::{AuthContext, User},
    errors::{Error, Result},
    models::{
        FavoriteRecord, ForecastPoint, ForecastRequest, ForecastResponse, Home, NewFavorite,
        Priority, Task, TaskGenerationRequest,
    },
    services::{
        CatalogService, ChatService, FavoritesService, ForecastService, RecentlyViewedService,
        TaskService,
    },
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with the local-store tables.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

pub fn signed_in(id: &str) -> AuthContext {
    AuthContext::logged_in(User {
        id: id.to_string(),
        name: format!("User {id}"),
    })
}

/// A listing with sensible defaults: 3 bed / 2 bath in Austin, no area.
pub fn sample_home(id: &str, price: f64) -> Home {
    Home {
        id: id.to_string(),
        title: format!("Home {id}"),
        city: "Austin".to_string(),
        price,
        bedrooms: 3.0,
        bathrooms: 2.0,
        image: None,
        area: None,
        selected: false,
    }
}

pub fn sample_task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        category: "financing".to_string(),
        due_date: "2026-12-01".to_string(),
        priority: Priority::Medium,
        completed: false,
    }
}

pub fn point(date: &str, price: f64) -> ForecastPoint {
    ForecastPoint {
        date: date.to_string(),
        price,
    }
}

fn unavailable() -> Error {
    Error::Service {
        status: 503,
        message: "unavailable".to_string(),
    }
}

/// Favorites backend enforcing `(user_id, home_ref)` uniqueness.
#[derive(Default)]
pub struct FakeFavorites {
    records: Mutex<Vec<FavoriteRecord>>,
    next_id: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub add_calls: AtomicUsize,
    pub remove_calls: AtomicUsize,
    pub fail_mutations: AtomicBool,
    pub fail_fetch: AtomicBool,
}

impl FakeFavorites {
    pub fn network_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
            + self.add_calls.load(Ordering::SeqCst)
            + self.remove_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<FavoriteRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl FavoritesService for FakeFavorites {
    async fn fetch_favorites(&self, user_id: &str) -> Result<Vec<FavoriteRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add_favorite(&self, favorite: &NewFavorite) -> Result<()> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.user_id == favorite.user_id && r.home_ref == favorite.home_ref)
        {
            return Err(Error::Service {
                status: 409,
                message: "duplicate".to_string(),
            });
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        records.push(FavoriteRecord {
            record_id: format!("fav-{id}"),
            user_id: favorite.user_id.clone(),
            home_ref: favorite.home_ref.clone(),
            title: favorite.title.clone(),
            city: favorite.city.clone(),
            price: favorite.price,
            bedrooms: favorite.bedrooms,
            bathrooms: favorite.bathrooms,
            image: favorite.image.clone(),
        });
        Ok(())
    }

    async fn remove_favorite(&self, record_id: &str) -> Result<()> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.record_id != record_id);
        if records.len() == before {
            return Err(Error::NotFound {
                resource: "favorite",
                id: record_id.to_string(),
            });
        }
        Ok(())
    }
}

/// Task backend; each `generate_tasks` call pops the next scripted batch.
#[derive(Default)]
pub struct FakeTasks {
    pub stored: Mutex<Vec<Task>>,
    pub batches: Mutex<VecDeque<Vec<Task>>>,
    pub last_request: Mutex<Option<TaskGenerationRequest>>,
    pub calls: AtomicUsize,
    pub fail_delete: AtomicBool,
}

impl FakeTasks {
    pub fn with_batches(batches: Vec<Vec<Task>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskService for FakeTasks {
    async fn fetch_tasks(&self, _user_id: &str) -> Result<Vec<Task>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn generate_tasks(&self, request: &TaskGenerationRequest) -> Result<Vec<Task>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        let batch = self.batches.lock().unwrap().pop_front().ok_or_else(unavailable)?;
        *self.stored.lock().unwrap() = batch.clone();
        Ok(batch)
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut stored = self.stored.lock().unwrap();
        let before = stored.len();
        stored.retain(|t| t.id != task_id);
        if stored.len() == before {
            return Err(Error::NotFound {
                resource: "task",
                id: task_id.to_string(),
            });
        }
        Ok(())
    }
}

/// Forecast backend returning a fixed response, or 503 when none is set.
#[derive(Default)]
pub struct FakeForecast {
    pub response: Mutex<Option<ForecastResponse>>,
    pub last_request: Mutex<Option<ForecastRequest>>,
    pub calls: AtomicUsize,
}

impl FakeForecast {
    pub fn returning(response: ForecastResponse) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            ..Self::default()
        }
    }

    pub fn set_response(&self, response: Option<ForecastResponse>) {
        *self.response.lock().unwrap() = response;
    }
}

#[async_trait]
impl ForecastService for FakeForecast {
    async fn request_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.response.lock().unwrap().clone().ok_or_else(unavailable)
    }
}

/// Recently-viewed backend that only counts calls.
#[derive(Default)]
pub struct FakeViews {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

#[async_trait]
impl RecentlyViewedService for FakeViews {
    async fn upsert_view(&self, _user_id: &str, _home_id: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

/// Catalog backend with a fixed listing set; matches on title, city or id.
#[derive(Default)]
pub struct FakeCatalog {
    pub homes: Vec<Home>,
    pub fail: AtomicBool,
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn search_homes(&self, query: &str) -> Result<Vec<Home>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Network {
                message: "connection refused".to_string(),
            });
        }
        let query = query.to_lowercase();
        Ok(self
            .homes
            .iter()
            .filter(|h| {
                h.id == query
                    || h.title.to_lowercase().contains(&query)
                    || h.city.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }
}

/// Chat backend that answers from a queue of replies; an empty queue fails.
#[derive(Default)]
pub struct FakeChat {
    pub replies: Mutex<VecDeque<String>>,
    pub received: Mutex<Vec<String>>,
}

impl FakeChat {
    pub fn with_replies(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| (*r).to_string()).collect()),
            received: Mutex::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatService for FakeChat {
    async fn send_message(&self, message: &str) -> Result<String> {
        self.received.lock().unwrap().push(message.to_string());
        self.replies.lock().unwrap().pop_front().ok_or_else(unavailable)
    }
}
