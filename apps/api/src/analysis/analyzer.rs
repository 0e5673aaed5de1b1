//! Job analysis pipeline: prompt → model call → defensive parse.

use tracing::{error, info};

use crate::analysis::models::{AnalysisRequest, AnalysisResult};
use crate::analysis::parser::parse_analysis_response;
use crate::analysis::prompts::build_analysis_prompt;
use crate::llm_client::{LlmError, TextGenerator};

/// Runs one analysis. Only a failed model call is an error; undecodable
/// output still produces a (degraded) result.
pub async fn analyze_job(
    generator: &dyn TextGenerator,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, LlmError> {
    let prompt = build_analysis_prompt(request);
    info!(
        "Analyzing job: title={:?} budget={:?} skills={:?} prompt_len={}",
        request.job_title,
        request.budget,
        request.skills,
        prompt.len()
    );

    let raw = generator.generate(&prompt).await.map_err(|e| {
        error!("Model generation failed: {e}");
        e
    })?;
    info!("Model returned {} characters", raw.len());

    let result = parse_analysis_response(&raw);
    info!(
        "Analysis parsed: proposal_len={} spec_sheet_len={} has_time_estimate={} has_workload_division={}",
        result.proposal.len(),
        result.spec_sheet_prompt.len(),
        !result.time_estimate.is_empty(),
        !result.workload_division.is_empty()
    );

    Ok(result)
}
