// Prompt text for job analysis.
// Inputs are interpolated positionally, so braces inside user text are never
// mistaken for placeholders.

use crate::analysis::models::AnalysisRequest;

/// Renders the full analysis instruction for one job posting and profile.
/// Optional fields are rendered even when empty.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    format!(
        r#"You are an expert freelance consultant helping contractors on Upwork create winning proposals and project plans.

JOB POSTING:
Title: {}
Description: {}
Budget: {}
Required Skills: {}

CONTRACTOR PROFILE:
Profile: {}
Skills: {}

Please provide a comprehensive analysis with the following sections:

1. PROPOSAL (2-3 paragraphs)
Write a compelling, professional yet relatable proposal that:
- Demonstrates understanding of the project requirements
- Highlights relevant experience and skills
- Shows enthusiasm and reliability
- Uses a tone that matches the job posting's formality level

2. SPEC SHEET PROMPT
Create a detailed prompt that can be used with AI coding agents (GitHub Copilot, Jules, etc.) to generate a technical specification document. This prompt should include:
- Project requirements breakdown
- Technical architecture considerations
- Implementation approach
- Key deliverables
- Testing and QA requirements

3. TIME ESTIMATE
Provide a realistic time estimate broken down by:
- Total hours required
- Breakdown by major project phases
- Buffer time for revisions and feedback

4. WORKLOAD DIVISION
Suggest how to divide work between:
- AI agents (GitHub Copilot, Jules): tasks suitable for automation, code generation, repetitive work
- Human contractor: tasks requiring judgment, creative decisions, client communication, QA, strategic planning
Include specific percentages and reasoning.

5. QUESTIONS FOR CLIENT (5-7 questions)
List strategic questions to ask the client to:
- Clarify requirements
- Understand their goals and priorities
- Set proper expectations
- Establish a smooth workflow

6. TIPS AND ADVICE (4-6 points)
Provide actionable advice on:
- Setting clear deliverables and milestones
- Managing client expectations
- QA and testing approach
- Handoff procedures
- Communication best practices

7. TONE ANALYSIS
Analyze the job posting's tone (formal, casual, technical, etc.) and suggest the best communication approach.

Format your response as a single JSON object with these exact keys:
{{
  "proposal": "...",
  "spec_sheet_prompt": "...",
  "time_estimate": "...",
  "workload_division": "...",
  "questions_for_client": ["...", "..."],
  "tips_and_advice": ["...", "..."],
  "tone_analysis": "..."
}}"#,
        request.job_title,
        request.job_description,
        request.budget,
        request.skills,
        request.user_profile,
        request.user_skills,
    )
}
