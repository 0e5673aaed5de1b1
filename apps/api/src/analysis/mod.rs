// Job analysis: turns a job posting and a freelancer profile into a proposal
// package. All model calls go through llm_client.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
