//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities back the local store for favorites and recently-viewed homes.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod favorite;
pub mod recently_viewed;

// Re-export specific types to avoid conflicts
pub use favorite::{Column as FavoriteColumn, Entity as Favorite, Model as FavoriteModel};
pub use recently_viewed::{
    Column as RecentlyViewedColumn, Entity as RecentlyViewed, Model as RecentlyViewedModel,
};
