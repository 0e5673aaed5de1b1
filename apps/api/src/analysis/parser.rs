//! Response parser — turns loosely-structured model text into an `AnalysisResult`.
//!
//! Parsing never fails outward. The model is asked for bare JSON but may wrap
//! it in a markdown fence or nest the whole object as a string inside
//! `proposal`; both are absorbed here. Anything still undecodable becomes a
//! degraded result carrying the raw text as the proposal.

use tracing::{debug, info, warn};

use crate::analysis::models::{AnalysisResult, FlexibleField};

/// Shown in `spec_sheet_prompt` when the model output could not be decoded.
pub const PARSE_FAILURE_NOTICE: &str =
    "Failed to parse response. Please check the API server logs.";

const RAW_PREVIEW_CHARS: usize = 500;
const STRIPPED_PREVIEW_CHARS: usize = 300;

/// Parses raw model output into an `AnalysisResult`, falling back to a
/// degraded result when the text is not a JSON object.
pub fn parse_analysis_response(raw: &str) -> AnalysisResult {
    if !raw.is_empty() {
        debug!("Raw model response: {}", preview(raw, RAW_PREVIEW_CHARS));
    }

    let trimmed = raw.trim();
    let text = strip_code_fence(trimmed);
    if text.len() != trimmed.len() {
        info!(
            "Stripped markdown fence from model response (before={}, after={})",
            trimmed.len(),
            text.len()
        );
        debug!("Stripped JSON: {}", preview(text, STRIPPED_PREVIEW_CHARS));
    }

    match serde_json::from_str::<AnalysisResult>(text) {
        Ok(result) => {
            info!(
                "Decoded analysis JSON: proposal_len={}, spec_sheet_len={}, questions={}, tips={}",
                result.proposal.len(),
                result.spec_sheet_prompt.len(),
                result.questions_for_client.len(),
                result.tips_and_advice.len()
            );
            unwrap_nested_proposal(result)
        }
        Err(e) => {
            warn!(
                "Failed to decode analysis JSON at line {} column {}: {e}",
                e.line(),
                e.column()
            );
            debug!("Undecodable content: {}", preview(text, RAW_PREVIEW_CHARS));
            degraded_result(text)
        }
    }
}

/// Strips a markdown code fence (```json ... ``` or ``` ... ```) when it spans
/// the whole input. Fences embedded in surrounding prose are left alone.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    if text.len() < 6 || !text.starts_with("```") || !text.ends_with("```") {
        return text;
    }

    let inner = &text[3..text.len() - 3];
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

/// Some responses carry the whole object again, serialized, inside `proposal`.
/// If that inner string decodes it replaces the outer result.
fn unwrap_nested_proposal(outer: AnalysisResult) -> AnalysisResult {
    if !outer.proposal.trim_start().starts_with('{') {
        return outer;
    }

    debug!("Proposal looks like nested JSON, attempting to decode it");
    match serde_json::from_str::<AnalysisResult>(&outer.proposal) {
        Ok(inner) => {
            info!("Decoded nested analysis JSON from proposal field");
            inner
        }
        Err(e) => {
            warn!("Nested proposal JSON did not decode, keeping outer result: {e}");
            outer
        }
    }
}

fn degraded_result(text: &str) -> AnalysisResult {
    AnalysisResult {
        proposal: text.to_string(),
        spec_sheet_prompt: PARSE_FAILURE_NOTICE.to_string(),
        time_estimate: FlexibleField::default(),
        workload_division: FlexibleField::default(),
        questions_for_client: Vec::new(),
        tips_and_advice: Vec::new(),
        tone_analysis: String::new(),
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
