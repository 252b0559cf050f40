//! News articles.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub url: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
}
