use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressData {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub current: DateTime<Utc>,
    pub percentage: Option<f64>,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: Option<String>,
}

/// Body of `/api/edit` and `/edit`. Empty strings count as "unchanged".
#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub path: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub path: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub current: DateTime<Utc>,
    pub percentage: Option<f64>,
    pub title: String,
    pub status: String,
    pub share_text: String,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub path: String,
    pub title: String,
    pub status: String,
    pub fragment: String,
}
