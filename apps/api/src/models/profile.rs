use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub description: String,
    pub skills: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioItemRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub position: i32,
    pub title: String,
    pub link: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A profile together with its portfolio, ordered by position.
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub profile: ProfileRow,
    pub portfolio_items: Vec<PortfolioItemRow>,
}

/// Values written by a profile save. Blank portfolio items are already removed.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub description: String,
    pub skills: String,
    pub portfolio_items: Vec<PortfolioItemInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioItemInput {
    pub title: String,
    pub link: String,
    pub description: String,
}

impl PortfolioItemInput {
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
            && self.link.trim().is_empty()
            && self.description.trim().is_empty()
    }
}
