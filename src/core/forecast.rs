//! Price forecast view model.
//!
//! Holds the selected home and the forecast fetched for it. A forecast is only
//! requested on explicit user action, and switching the selection drops the
//! displayed series so a forecast is never shown against the wrong home.

use crate::{
    errors::{Error, Result},
    models::{Confidence, ForecastPoint, ForecastRequest, ForecastResponse, Home},
    services::ForecastService,
};
use chrono::{DateTime, NaiveDate};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Rendered when the backend sends no confidence value
pub const CONFIDENCE_PLACEHOLDER: &str = "N/A";

/// A plottable forecast: strictly increasing dates, finite prices.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    /// Home the forecast was computed for
    pub home_id: String,
    pub points: Vec<ForecastPoint>,
    pub confidence: Option<Confidence>,
}

impl ForecastSeries {
    #[must_use]
    pub fn confidence_label(&self) -> String {
        self.confidence
            .as_ref()
            .map_or_else(|| CONFIDENCE_PLACEHOLDER.to_string(), ToString::to_string)
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM` (first of month) and RFC 3339 timestamps.
fn parse_forecast_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Sorts points by date and drops unusable ones.
///
/// Points with an unparseable date or a non-finite price are skipped; when two
/// points share a date the later one in the response wins.
#[must_use]
pub fn normalize_points(points: Vec<ForecastPoint>) -> Vec<ForecastPoint> {
    let mut dated: Vec<(NaiveDate, f64)> = points
        .into_iter()
        .filter_map(|point| {
            let Some(date) = parse_forecast_date(&point.date) else {
                warn!("Dropping forecast point with unreadable date '{}'", point.date);
                return None;
            };
            point.price.is_finite().then_some((date, point.price))
        })
        .collect();

    // Stable sort keeps response order among equal dates
    dated.sort_by_key(|(date, _)| *date);

    let mut normalized: Vec<(NaiveDate, f64)> = Vec::with_capacity(dated.len());
    for (date, price) in dated {
        match normalized.last_mut() {
            Some(last) if last.0 == date => last.1 = price,
            _ => normalized.push((date, price)),
        }
    }

    normalized
        .into_iter()
        .map(|(date, price)| ForecastPoint {
            date: date.format("%Y-%m-%d").to_string(),
            price,
        })
        .collect()
}

/// Builds the request body for `home`, substituting `default_area` when it has none.
#[must_use]
pub fn build_request(home: &Home, default_area: f64) -> ForecastRequest {
    let area = home
        .area
        .filter(|area| area.is_finite() && *area > 0.0)
        .unwrap_or(default_area);
    let price = (home.price.is_finite() && home.price > 0.0).then_some(home.price);
    ForecastRequest {
        area,
        bedrooms: home.bedrooms,
        bathrooms: home.bathrooms,
        price,
    }
}

/// Selected home, its fetched forecast and the last request error.
pub struct ForecastViewModel {
    service: Arc<dyn ForecastService>,
    default_area: f64,
    selected: Option<Home>,
    series: Option<ForecastSeries>,
    last_error: Option<String>,
}

impl ForecastViewModel {
    #[must_use]
    pub fn new(service: Arc<dyn ForecastService>, default_area: f64) -> Self {
        Self {
            service,
            default_area,
            selected: None,
            series: None,
            last_error: None,
        }
    }

    /// Selects a home. Picking a different home clears the displayed forecast;
    /// nothing is fetched until [`Self::request_forecast`] is called.
    pub fn select_home(&mut self, mut home: Home) {
        let same_home = self.selected.as_ref().is_some_and(|h| h.id == home.id);
        if !same_home {
            self.series = None;
            self.last_error = None;
        }
        home.selected = true;
        self.selected = Some(home);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.series = None;
        self.last_error = None;
    }

    #[must_use]
    pub const fn selected_home(&self) -> Option<&Home> {
        self.selected.as_ref()
    }

    /// Whether the forecast action should be enabled.
    #[must_use]
    pub const fn can_request_forecast(&self) -> bool {
        self.selected.is_some()
    }

    /// Fetches a forecast for the selected home.
    ///
    /// Returns `Ok(None)` without contacting the service when nothing is selected.
    /// On failure the previously displayed forecast is kept and the error recorded.
    pub async fn request_forecast(&mut self) -> Result<Option<&ForecastSeries>> {
        let Some(home) = self.selected.as_ref() else {
            return Ok(None);
        };
        let home_id = home.id.clone();
        let request = build_request(home, self.default_area);

        let outcome = match self.service.request_forecast(&request).await {
            Ok(response) => Self::into_series(home_id, response),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(series) => {
                info!(
                    "Forecast for home {} has {} points",
                    series.home_id,
                    series.points.len()
                );
                self.last_error = None;
                self.series = Some(series);
                Ok(self.series())
            }
            Err(e) => {
                error!("Forecast request failed: {e}");
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn into_series(home_id: String, response: ForecastResponse) -> Result<ForecastSeries> {
        let points = normalize_points(response.forecast);
        if points.is_empty() {
            return Err(Error::Service {
                status: 502,
                message: "forecast response contained no usable points".to_string(),
            });
        }
        Ok(ForecastSeries {
            home_id,
            points,
            confidence: response.confidence,
        })
    }

    /// The forecast for the current selection, if one has been fetched.
    #[must_use]
    pub fn series(&self) -> Option<&ForecastSeries> {
        let selected = self.selected.as_ref()?;
        self.series.as_ref().filter(|s| s.home_id == selected.id)
    }

    /// Confidence of the displayed forecast, `"N/A"` when absent.
    #[must_use]
    pub fn confidence_label(&self) -> String {
        self.series().map_or_else(
            || CONFIDENCE_PLACEHOLDER.to_string(),
            ForecastSeries::confidence_label,
        )
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
