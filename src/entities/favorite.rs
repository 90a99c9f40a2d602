//! Favorite entity - A home a user has marked as a favorite.
//!
//! Rows are unique on `(user_id, home_ref)`; the index is created alongside the
//! table in `config::database::create_tables`. Descriptive fields are copied from
//! the listing at the time it was favorited.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Favorite database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "favorites")]
pub struct Model {
    /// Record id, exposed to clients as a string
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of the favorite
    pub user_id: String,
    /// External id of the favorited home
    pub home_ref: String,
    pub title: String,
    pub city: String,
    pub price: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub image: Option<String>,
    /// When the favorite was created
    pub created_at: DateTimeUtc,
}

/// `Favorite` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::FavoriteRecord {
    fn from(model: Model) -> Self {
        Self {
            record_id: model.id.to_string(),
            user_id: model.user_id,
            home_ref: model.home_ref,
            title: model.title,
            city: model.city,
            price: model.price,
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            image: model.image,
        }
    }
}
