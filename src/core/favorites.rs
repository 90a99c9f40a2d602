//! Favorite homes for the current user.
//!
//! Membership is decided against the local snapshot, but after every mutation the
//! store re-fetches the authoritative list instead of patching its own copy. That
//! read-after-write keeps the displayed set equal to server truth even when two
//! toggles race on the same home.

use crate::{
    auth::AuthContext,
    errors::{Error, Result},
    models::{FavoriteRecord, Home, NewFavorite},
    services::FavoritesService,
};
use std::sync::Arc;
use tracing::{error, info, warn};

const ACTION: &str = "manage favorites";

/// The current user's favorite homes as last confirmed by the favorites service.
pub struct FavoriteStore {
    service: Arc<dyn FavoritesService>,
    auth: AuthContext,
    favorites: Vec<FavoriteRecord>,
    last_error: Option<String>,
}

impl FavoriteStore {
    #[must_use]
    pub fn new(service: Arc<dyn FavoritesService>, auth: AuthContext) -> Self {
        Self {
            service,
            auth,
            favorites: Vec::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn favorites(&self) -> &[FavoriteRecord] {
        &self.favorites
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The local record for a home, matched on its external id.
    #[must_use]
    pub fn find(&self, home_id: &str) -> Option<&FavoriteRecord> {
        self.favorites.iter().find(|r| r.home_ref == home_id)
    }

    #[must_use]
    pub fn is_favorite(&self, home_id: &str) -> bool {
        self.find(home_id).is_some()
    }

    /// Whether favorite controls should be enabled.
    #[must_use]
    pub fn can_modify(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Replaces the local snapshot with the server's list.
    ///
    /// Guests get an empty list without any request being made.
    pub async fn load_favorites(&mut self) -> Result<&[FavoriteRecord]> {
        let Some(user_id) = self.auth.user_id().map(str::to_string) else {
            self.favorites.clear();
            self.last_error = None;
            return Ok(&self.favorites);
        };

        match self.service.fetch_favorites(&user_id).await {
            Ok(favorites) => {
                self.favorites = favorites;
                self.last_error = None;
                Ok(&self.favorites)
            }
            Err(e) => {
                error!("Failed to fetch favorites for {user_id}: {e}");
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Adds `home` unless a record for it already exists locally.
    pub async fn add_favorite(&mut self, home: &Home) -> Result<&[FavoriteRecord]> {
        let user_id = self.require_user()?;
        if self.is_favorite(&home.id) {
            return Ok(&self.favorites);
        }

        let request = NewFavorite::from_home(&user_id, home);
        let outcome = self.service.add_favorite(&request).await;
        self.reconcile(outcome, &format!("added home {}", home.id))
            .await
    }

    /// Removes the favorite for `home_id`; a no-op if it is not a favorite locally.
    pub async fn remove_favorite(&mut self, home_id: &str) -> Result<&[FavoriteRecord]> {
        self.require_user()?;
        let Some(record_id) = self.find(home_id).map(|r| r.record_id.clone()) else {
            return Ok(&self.favorites);
        };

        let outcome = self.service.remove_favorite(&record_id).await;
        self.reconcile(outcome, &format!("removed home {home_id}"))
            .await
    }

    /// Removes the favorite if present, adds it otherwise.
    ///
    /// Unauthenticated callers are rejected before any request is issued.
    pub async fn toggle_favorite(&mut self, home: &Home) -> Result<&[FavoriteRecord]> {
        self.require_user()?;
        if self.is_favorite(&home.id) {
            self.remove_favorite(&home.id).await
        } else {
            self.add_favorite(home).await
        }
    }

    fn require_user(&mut self) -> Result<String> {
        if let Some(user_id) = self.auth.user_id() {
            return Ok(user_id.to_string());
        }
        warn!("Favorite change attempted without a logged-in user");
        let err = Error::AuthRequired { action: ACTION };
        self.last_error = Some(err.user_message());
        Err(err)
    }

    /// Re-fetches after a mutation.
    ///
    /// A conflict or not-found answer means our snapshot was stale, so the list is
    /// still refreshed before the error is surfaced. Any other failure leaves the
    /// snapshot exactly as it was.
    async fn reconcile(&mut self, outcome: Result<()>, what: &str) -> Result<&[FavoriteRecord]> {
        match outcome {
            Ok(()) => {
                info!("Favorites: {what}");
                self.load_favorites().await
            }
            Err(e @ (Error::NotFound { .. } | Error::Service { status: 409, .. })) => {
                warn!("Favorites out of sync ({e}), refreshing");
                let refresh = self.load_favorites().await.map(<[_]>::len);
                if let Err(refresh_err) = refresh {
                    error!("Refresh after stale favorite change failed: {refresh_err}");
                }
                self.last_error = Some(e.user_message());
                Err(e)
            }
            Err(e) => {
                error!("Favorite change failed: {e}");
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
