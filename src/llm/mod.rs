//! LLM module for feedback-insights
//!
//! Prompt construction, provider clients and response parsing for the
//! insight summary.

mod client;
mod gemini;
mod insights;
mod openai;
mod prompts;

pub use client::{build_provider, LlmProvider};
pub use gemini::GeminiClient;
pub use insights::{parse_insight_sections, InsightSections};
pub use openai::OpenAiClient;
pub use prompts::{build_insight_prompt, build_samples_block, PromptPayload, SYSTEM_PROMPT};
