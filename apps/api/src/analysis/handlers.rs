//! Axum route handler for job analysis.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

use crate::analysis::analyzer::analyze_job;
use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/analyze-job
///
/// Body decoding failures of any kind answer 400. A missing model client
/// answers 503 and a failed model call 500; undecodable model output is still
/// a 200 carrying the degraded result.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Invalid analyze-job body: {rejection}");
        AppError::InvalidInput("Invalid request body".to_string())
    })?;

    info!(
        "Received analyze-job request: title={:?} budget={:?} skills={:?} profile_len={} user_skills_len={}",
        request.job_title,
        request.budget,
        request.skills,
        request.user_profile.len(),
        request.user_skills.len()
    );

    let generator = state.generator.as_deref().ok_or_else(|| {
        AppError::ServiceUnavailable("no model client configured (GEMINI_API_KEY unset)".to_string())
    })?;

    let result = analyze_job(generator, &request).await?;

    info!(
        "Analysis complete: proposal_len={} spec_sheet_len={} questions={} tips={}",
        result.proposal.len(),
        result.spec_sheet_prompt.len(),
        result.questions_for_client.len(),
        result.tips_and_advice.len()
    );

    Ok(Json(result))
}
