//! `generateContent` request body.

use serde::Serialize;

use crate::config::{
    SUMMARY_MAX_OUTPUT_TOKENS, SUMMARY_SAFETY_CATEGORY, SUMMARY_SAFETY_THRESHOLD,
    SUMMARY_TEMPERATURE, SUMMARY_TOP_K, SUMMARY_TOP_P,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl GenerateContentRequest {
    /// Single-turn request carrying `prompt` with the fixed summary settings.
    pub(crate) fn for_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            safety_settings: vec![SafetySetting {
                category: SUMMARY_SAFETY_CATEGORY,
                threshold: SUMMARY_SAFETY_THRESHOLD,
            }],
            generation_config: GenerationConfig {
                temperature: SUMMARY_TEMPERATURE,
                top_k: SUMMARY_TOP_K,
                top_p: SUMMARY_TOP_P,
                max_output_tokens: SUMMARY_MAX_OUTPUT_TOKENS,
            },
        }
    }
}
