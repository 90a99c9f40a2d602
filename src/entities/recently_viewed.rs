//! Recently viewed entity - One row per `(user_id, home_id)` pair.
//!
//! Repeated views refresh `viewed_at` through an upsert instead of adding rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recently viewed database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recently_viewed")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub home_id: String,
    /// Time of the most recent view
    pub viewed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::RecentlyViewed {
    fn from(model: Model) -> Self {
        Self {
            user_id: model.user_id,
            home_id: model.home_id,
            viewed_at: model.viewed_at,
        }
    }
}
