//! Home search results and the single UI selection over them.

use crate::{
    errors::{Error, Result},
    models::Home,
    services::CatalogService,
};
use std::sync::Arc;
use tracing::{error, info};

/// Shown when a search request fails for any reason
pub const SEARCH_FAILED: &str = "Search failed. Try again.";

/// Latest search results with at most one of them selected.
pub struct HomeCatalog {
    service: Arc<dyn CatalogService>,
    results: Vec<Home>,
    last_error: Option<String>,
}

impl HomeCatalog {
    #[must_use]
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self {
            service,
            results: Vec::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn results(&self) -> &[Home] {
        &self.results
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Searches the catalog and replaces the current results.
    ///
    /// A failed search clears the results rather than showing stale or made-up
    /// listings.
    pub async fn search(&mut self, query: &str) -> Result<&[Home]> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid("search", "enter a city, title or listing id"));
        }

        match self.service.search_homes(query).await {
            Ok(homes) => {
                info!("Search '{query}' returned {} homes", homes.len());
                self.results = homes;
                self.last_error = None;
                Ok(&self.results)
            }
            Err(e) => {
                error!("Search '{query}' failed: {e}");
                self.results.clear();
                self.last_error = Some(SEARCH_FAILED.to_string());
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn find(&self, home_id: &str) -> Option<&Home> {
        self.results.iter().find(|h| h.id == home_id)
    }

    /// Marks `home_id` as the only selected result.
    pub fn select(&mut self, home_id: &str) -> Result<&Home> {
        let index = self
            .results
            .iter()
            .position(|h| h.id == home_id)
            .ok_or_else(|| Error::NotFound {
                resource: "home",
                id: home_id.to_string(),
            })?;
        for (i, home) in self.results.iter_mut().enumerate() {
            home.selected = i == index;
        }
        Ok(&self.results[index])
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Home> {
        self.results.iter().find(|h| h.selected)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{FakeCatalog, sample_home};
    use std::sync::atomic::Ordering;

    fn catalog() -> Arc<FakeCatalog> {
        let mut dallas = sample_home("h3", 510_000.0);
        dallas.city = "Dallas".to_string();
        Arc::new(FakeCatalog {
            homes: vec![
                sample_home("h1", 350_000.0),
                sample_home("h2", 420_000.0),
                dallas,
            ],
            ..FakeCatalog::default()
        })
    }

    #[tokio::test]
    async fn test_search_and_select() -> Result<()> {
        let mut catalog = HomeCatalog::new(catalog());
        assert_eq!(catalog.search("austin").await?.len(), 2);

        catalog.select("h1")?;
        catalog.select("h2")?;
        assert_eq!(catalog.selected().unwrap().id, "h2");
        assert_eq!(catalog.results().iter().filter(|h| h.selected).count(), 1);

        assert!(matches!(
            catalog.select("h3"),
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_search_clears_results() -> Result<()> {
        let fake = catalog();
        let mut catalog = HomeCatalog::new(fake.clone());
        catalog.search("dallas").await?;
        assert!(catalog.find("h3").is_some());

        fake.fail.store(true, Ordering::SeqCst);
        assert!(catalog.search("dallas").await.is_err());
        assert!(catalog.results().is_empty());
        assert_eq!(catalog.last_error(), Some(SEARCH_FAILED));
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let mut catalog = HomeCatalog::new(catalog());
        assert!(matches!(
            catalog.search("  ").await,
            Err(Error::InvalidInput { .. })
        ));
    }
}
