//! Local store - `SQLite` persistence for favorites and recently-viewed homes.
//!
//! Both tables carry a composite unique index on `(user, home)`. Favorites reject
//! duplicates; recently-viewed rows are upserted so repeated views refresh the
//! timestamp of the existing row.

use super::{FavoritesService, RecentlyViewedService};
use crate::{
    entities::{Favorite, RecentlyViewed, favorite, recently_viewed},
    errors::{Error, Result},
    models::{self, FavoriteRecord, NewFavorite},
};
use async_trait::async_trait;
use sea_orm::{QueryOrder, Set, SqlErr, prelude::*, sea_query::OnConflict};
use tracing::{debug, info, instrument};

/// `SeaORM`-backed implementation of the uniqueness-constrained collaborators.
#[derive(Debug, Clone)]
pub struct LocalStore {
    db: DatabaseConnection,
}

impl LocalStore {
    /// Wraps an existing connection; tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Lists a user's recently-viewed homes, newest first.
    pub async fn recently_viewed(&self, user_id: &str) -> Result<Vec<models::RecentlyViewed>> {
        let rows = RecentlyViewed::find()
            .filter(recently_viewed::Column::UserId.eq(user_id))
            .order_by_desc(recently_viewed::Column::ViewedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Turns a unique-index violation into a conflict status; anything else stays a database error.
fn map_insert_error(err: DbErr) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => Error::Service {
            status: 409,
            message: format!("Home is already a favorite: {detail}"),
        },
        _ => Error::Database(err),
    }
}

#[async_trait]
impl FavoritesService for LocalStore {
    #[instrument(skip(self))]
    async fn fetch_favorites(&self, user_id: &str) -> Result<Vec<FavoriteRecord>> {
        let rows = Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_asc(favorite::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, new), fields(home_ref = %new.home_ref))]
    async fn add_favorite(&self, new: &NewFavorite) -> Result<()> {
        let model = favorite::ActiveModel {
            user_id: Set(new.user_id.clone()),
            home_ref: Set(new.home_ref.clone()),
            title: Set(new.title.clone()),
            city: Set(new.city.clone()),
            price: Set(new.price),
            bedrooms: Set(new.bedrooms),
            bathrooms: Set(new.bathrooms),
            image: Set(new.image.clone()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.map_err(map_insert_error)?;
        info!("Stored favorite {} for user {}", inserted.id, inserted.user_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_favorite(&self, record_id: &str) -> Result<()> {
        let not_found = || Error::NotFound {
            resource: "favorite",
            id: record_id.to_string(),
        };
        let id: i64 = record_id.parse().map_err(|_| not_found())?;

        let result = Favorite::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(not_found());
        }
        debug!("Removed favorite {id}");
        Ok(())
    }
}

#[async_trait]
impl RecentlyViewedService for LocalStore {
    #[instrument(skip(self))]
    async fn upsert_view(&self, user_id: &str, home_id: &str) -> Result<()> {
        let row = recently_viewed::ActiveModel {
            user_id: Set(user_id.to_string()),
            home_id: Set(home_id.to_string()),
            viewed_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        RecentlyViewed::insert(row)
            .on_conflict(
                OnConflict::columns([
                    recently_viewed::Column::UserId,
                    recently_viewed::Column::HomeId,
                ])
                .update_column(recently_viewed::Column::ViewedAt)
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{sample_home, setup_test_db};

    async fn store() -> Result<LocalStore> {
        Ok(LocalStore::new(setup_test_db().await?))
    }

    #[tokio::test]
    async fn test_add_and_fetch_favorites() -> Result<()> {
        let store = store().await?;
        let home = sample_home("h1", 350_000.0);
        store
            .add_favorite(&NewFavorite::from_home("u1", &home))
            .await?;

        let favorites = store.fetch_favorites("u1").await?;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].home_ref, "h1");
        assert_eq!(favorites[0].user_id, "u1");
        assert!(store.fetch_favorites("u2").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_favorite_is_a_conflict() -> Result<()> {
        let store = store().await?;
        let favorite = NewFavorite::from_home("u1", &sample_home("h1", 1.0));
        store.add_favorite(&favorite).await?;

        let result = store.add_favorite(&favorite).await;
        assert!(matches!(result, Err(Error::Service { status: 409, .. })));
        assert_eq!(store.fetch_favorites("u1").await?.len(), 1);

        // Same home for another user is a different pair
        let other = NewFavorite::from_home("u2", &sample_home("h1", 1.0));
        store.add_favorite(&other).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_favorite_twice_is_not_found() -> Result<()> {
        let store = store().await?;
        store
            .add_favorite(&NewFavorite::from_home("u1", &sample_home("h1", 1.0)))
            .await?;
        let record_id = store.fetch_favorites("u1").await?[0].record_id.clone();

        store.remove_favorite(&record_id).await?;
        let second = store.remove_favorite(&record_id).await;
        assert!(matches!(second, Err(Error::NotFound { .. })));

        let garbage = store.remove_favorite("not-a-number").await;
        assert!(matches!(garbage, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_repeated_views_keep_one_row() -> Result<()> {
        let store = store().await?;
        store.upsert_view("u1", "h1").await?;
        let first = store.recently_viewed("u1").await?;
        assert_eq!(first.len(), 1);

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.upsert_view("u1", "h1").await?;
        store.upsert_view("u1", "h2").await?;

        let rows = store.recently_viewed("u1").await?;
        assert_eq!(rows.len(), 2);
        let h1 = rows.iter().find(|r| r.home_id == "h1").unwrap();
        assert!(h1.viewed_at > first[0].viewed_at);

        let all = RecentlyViewed::find().all(store.connection()).await?;
        assert_eq!(all.len(), 2);
        Ok(())
    }
}
