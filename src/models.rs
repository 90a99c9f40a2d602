//! Domain and wire types shared by the components and their collaborators.
//!
//! Field names follow the JSON the backend speaks; Rust-side names stay snake case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Listing and task ids arrive as strings or bare numbers depending on the source.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// A listing from the backend catalog. The client only holds read-only copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub bedrooms: f64,
    #[serde(default)]
    pub bathrooms: f64,
    #[serde(default)]
    pub image: Option<String>,
    /// Living area in square feet, when the listing carries it.
    #[serde(default)]
    pub area: Option<f64>,
    /// UI-local selection flag, never sent to the backend.
    #[serde(skip)]
    pub selected: bool,
}

/// A stored favorite. Unique server-side on `(user_id, home_ref)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    #[serde(rename = "_id", alias = "recordId", deserialize_with = "id_string")]
    pub record_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// External id of the favorited home.
    #[serde(rename = "zpid", alias = "homeRef", deserialize_with = "id_string")]
    pub home_ref: String,
    pub title: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub bedrooms: f64,
    #[serde(default)]
    pub bathrooms: f64,
    #[serde(default)]
    pub image: Option<String>,
}

/// Body of an add-favorite request: the home's descriptive fields plus ownership.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFavorite {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "zpid")]
    pub home_ref: String,
    pub title: String,
    pub city: String,
    pub price: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub image: Option<String>,
}

impl NewFavorite {
    #[must_use]
    pub fn from_home(user_id: &str, home: &Home) -> Self {
        Self {
            user_id: user_id.to_string(),
            home_ref: home.id.clone(),
            title: home.title.clone(),
            city: home.city.clone(),
            price: home.price,
            bedrooms: home.bedrooms,
            bathrooms: home.bathrooms,
            image: home.image.clone(),
        }
    }
}

/// Display emphasis only; nothing branches on it beyond rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

/// One checklist item produced by the task service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, alias = "dueDate")]
    pub due_date: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

/// Body of a generate-tasks request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskGenerationRequest {
    pub user_id: String,
    pub credit_score: u32,
    pub refinancing_info: String,
}

/// One point of a price forecast as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: String,
    pub price: f64,
}

/// Model confidence; the backend sends either a label or a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Score(f64),
    Label(String),
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.write_str(label),
            Self::Score(score) if (0.0..=1.0).contains(score) => {
                write!(f, "{:.0}%", score * 100.0)
            }
            Self::Score(score) => write!(f, "{score}"),
        }
    }
}

/// Body of a forecast request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub area: f64,
    pub bedrooms: f64,
    pub bathrooms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Raw forecast response before normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub forecast: Vec<ForecastPoint>,
    #[serde(default)]
    pub confidence: Option<Confidence>,
}

/// One `(user, home)` view, unique on the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentlyViewed {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "homeId")]
    pub home_id: String,
    #[serde(rename = "viewedAt")]
    pub viewed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_favorite_record_accepts_document_id() {
        let json = r#"{"_id":"abc","userId":"u1","zpid":"h9","title":"Loft","city":"Austin",
            "price":410000,"bedrooms":2,"bathrooms":1,"image":null}"#;
        let record: FavoriteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.record_id, "abc");
        assert_eq!(record.home_ref, "h9");

        let json = r#"{"recordId":"7","userId":"u1","homeRef":"h9","title":"Loft"}"#;
        let record: FavoriteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.record_id, "7");
        assert_eq!(record.home_ref, "h9");
    }

    #[test]
    fn test_favorite_record_accepts_numeric_ids() {
        let json = r#"{"favorites":[{"recordId":41,"userId":"u1","zpid":2077485,"title":"Bungalow"}]}"#;
        let body: serde_json::Value = serde_json::from_str(json).unwrap();
        let records: Vec<FavoriteRecord> =
            serde_json::from_value(body["favorites"].clone()).unwrap();
        assert_eq!(records[0].record_id, "41");
        assert_eq!(records[0].home_ref, "2077485");

        // Matches the listing it was created from
        let home: Home = serde_json::from_str(r#"{"id":2077485,"title":"Bungalow"}"#).unwrap();
        assert_eq!(records[0].home_ref, home.id);
    }

    #[test]
    fn test_task_priority_defaults_to_medium() {
        let json = r#"{"id":"t1","title":"Get pre-approved","due_date":"2026-11-01"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);

        let json = r#"{"id":"t2","title":"Order inspection","priority":"high"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let home: Home =
            serde_json::from_str(r#"{"id":2077485,"title":"Bungalow","price":299000}"#).unwrap();
        assert_eq!(home.id, "2077485");
        assert!(!home.selected);

        let task: Task = serde_json::from_str(r#"{"id":12,"title":"Lock rate"}"#).unwrap();
        assert_eq!(task.id, "12");
    }

    #[test]
    fn test_confidence_display() {
        assert_eq!(Confidence::Label("high".into()).to_string(), "high");
        assert_eq!(Confidence::Score(0.87).to_string(), "87%");
        assert_eq!(Confidence::Score(42.5).to_string(), "42.5");
    }

    #[test]
    fn test_forecast_request_omits_missing_price() {
        let request = ForecastRequest {
            area: 1500.0,
            bedrooms: 3.0,
            bathrooms: 2.0,
            price: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("price").is_none());
        assert_eq!(json["area"], 1500.0);
    }
}

/// Who wrote a line of the assistant conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Bot,
}

/// One line of the assistant conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: ChatSender::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: ChatSender::Bot,
            text: text.into(),
        }
    }
}
