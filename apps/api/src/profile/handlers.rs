//! Axum route handlers for the freelancer profile.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{PortfolioItemInput, ProfileInput, ProfileRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub description: String,
    pub skills: String,
    pub portfolio_items: Vec<PortfolioItemInput>,
}

impl ProfileRequest {
    /// Drops portfolio items with nothing but whitespace in them.
    pub fn into_input(self) -> ProfileInput {
        ProfileInput {
            description: self.description,
            skills: self.skills,
            portfolio_items: self
                .portfolio_items
                .into_iter()
                .filter(|item| !item.is_blank())
                .collect(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ProfileResponse {
    pub description: String,
    pub skills: String,
    pub portfolio_items: Vec<PortfolioItemResponse>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioItemResponse {
    pub id: Uuid,
    pub title: String,
    pub link: String,
    pub description: String,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(record: ProfileRecord) -> Self {
        Self {
            description: record.profile.description,
            skills: record.profile.skills,
            portfolio_items: record
                .portfolio_items
                .into_iter()
                .map(|item| PortfolioItemResponse {
                    id: item.id,
                    title: item.title,
                    link: item.link,
                    description: item.description,
                })
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/profile
///
/// Returns the stored profile, or an empty one when nothing has been saved yet.
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let response = state
        .store
        .load_profile()
        .await?
        .map(ProfileResponse::from)
        .unwrap_or_default();

    Ok(Json(response))
}

/// POST|PUT /api/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<ProfileResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Invalid profile body: {rejection}");
        AppError::InvalidInput("Invalid request body".to_string())
    })?;

    let input = request.into_input();
    info!(
        "Saving profile: description_len={} skills_len={} portfolio_items={}",
        input.description.len(),
        input.skills.len(),
        input.portfolio_items.len()
    );

    let record = state.store.save_profile(&input).await?;
    Ok(Json(ProfileResponse::from(record)))
}
