//! Database configuration module for `HomeBuddy`.
//!
//! This module handles the `SQLite` connection and table creation for the local store
//! using `SeaORM`. Tables are generated from the entity models with
//! `Schema::create_table_from_entity`; the composite unique indexes that enforce
//! one favorite and one recently-viewed row per `(user, home)` pair are added on top.

use crate::entities::{Favorite, FavoriteColumn, RecentlyViewed, RecentlyViewedColumn};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/home_buddy.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates the favorites and recently-viewed tables plus their unique indexes.
///
/// Safe to call on every startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut favorite_table = schema.create_table_from_entity(Favorite);
    let mut recently_viewed_table = schema.create_table_from_entity(RecentlyViewed);
    favorite_table.if_not_exists();
    recently_viewed_table.if_not_exists();

    db.execute(builder.build(&favorite_table)).await?;
    db.execute(builder.build(&recently_viewed_table)).await?;

    let favorite_pair = Index::create()
        .if_not_exists()
        .name("idx_favorites_user_home")
        .table(Favorite)
        .col(FavoriteColumn::UserId)
        .col(FavoriteColumn::HomeRef)
        .unique()
        .to_owned();
    let viewed_pair = Index::create()
        .if_not_exists()
        .name("idx_recently_viewed_user_home")
        .table(RecentlyViewed)
        .col(RecentlyViewedColumn::UserId)
        .col(RecentlyViewedColumn::HomeId)
        .unique()
        .to_owned();

    db.execute(builder.build(&favorite_pair)).await?;
    db.execute(builder.build(&viewed_pair)).await?;

    tracing::info!("Local store tables ensured");
    Ok(())
}
