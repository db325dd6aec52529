//! Prompt sent to the summary model.

const PROMPT_HEADER: &str = "Analyze this IP address data from AbuseIPDB and provide a concise security summary.
Focus on:
- Safety level based on abuse confidence score
- Key risk factors
- Geographic and network information
- Recommendations if suspicious/malicious

Keep it brief and actionable (2-3 sentences max).

JSON Data: ";

/// Builds the summary prompt around the verbatim AbuseIPDB response body.
pub fn build_prompt(raw_reputation_json: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_HEADER.len() + raw_reputation_json.len());
    prompt.push_str(PROMPT_HEADER);
    prompt.push_str(raw_reputation_json);
    prompt
}
