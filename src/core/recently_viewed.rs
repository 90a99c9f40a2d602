//! Recently-viewed log.
//!
//! Every view goes through the backend's upsert, never a plain insert, so a
//! `(user, home)` pair is stored at most once and re-views only refresh its
//! timestamp.

use crate::{
    auth::AuthContext,
    errors::{Error, Result},
    services::RecentlyViewedService,
};
use std::sync::Arc;
use tracing::{debug, error};

/// Records home views for the current user through the upsert endpoint.
pub struct RecentlyViewedLogger {
    service: Arc<dyn RecentlyViewedService>,
    auth: AuthContext,
    last_error: Option<String>,
}

impl RecentlyViewedLogger {
    #[must_use]
    pub fn new(service: Arc<dyn RecentlyViewedService>, auth: AuthContext) -> Self {
        Self {
            service,
            auth,
            last_error: None,
        }
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Records that the current user viewed `home_id`.
    ///
    /// Both ids must be present; otherwise the call is rejected locally with
    /// [`Error::InvalidInput`] and the backend is never contacted.
    pub async fn log_view(&mut self, home_id: &str) -> Result<()> {
        let Some(user_id) = self.auth.user_id().map(str::to_string) else {
            return self.fail(Error::invalid("user id", "is required to log a view"));
        };
        let home_id = home_id.trim();
        if home_id.is_empty() {
            return self.fail(Error::invalid("home id", "is required to log a view"));
        }

        match self.service.upsert_view(&user_id, home_id).await {
            Ok(()) => {
                debug!("Logged view of {home_id} for {user_id}");
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                error!("Failed to log view of {home_id}: {e}");
                self.fail(e)
            }
        }
    }

    fn fail(&mut self, err: Error) -> Result<()> {
        self.last_error = Some(err.user_message());
        Err(err)
    }
}
