//! Prompts for CI log analysis

use crate::model::{AnalysisRequest, ErrorType};

/// System prompt for log analysis
pub const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are a debugging expert. Respond only with valid JSON.";

/// Build the analysis prompt for a CI/CD error log
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    let error_types = ErrorType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are an expert CI/CD debugger. Analyze this {language} error log and provide structured output.

ERROR LOG:
{log}

Respond ONLY with valid JSON in this exact format:
{{
  "root_cause": "One sentence describing the core issue",
  "error_type": "One of: {error_types}",
  "fixes": [
    {{"fix": "Specific actionable fix 1", "confidence": 0.95, "explanation": "Why this works"}},
    {{"fix": "Alternative fix 2", "confidence": 0.80, "explanation": "Why this works"}},
    {{"fix": "Fallback fix 3", "confidence": 0.60, "explanation": "Why this works"}}
  ],
  "explanation": "2-3 sentence technical explanation of why this error occurred"
}}

Be concise, actionable, and rank fixes by confidence."#,
        language = request.language,
        log = request.log_text,
        error_types = error_types,
    )
}
