//! Normalization of raw completion text into [`AnalysisResult`]
//!
//! Models wrap their JSON in prose or markdown fences and drop or mistype
//! fields. The normalizer decodes the text schema-less and fills every
//! missing field with a default instead of rejecting partial documents.
//! Values are not semantically validated: confidence is not clamped and
//! `error_type` is not checked against the known categories.

use serde_json::{Map, Value};

use crate::model::analysis::{
    DEFAULT_CONFIDENCE, DEFAULT_ERROR_TYPE, DEFAULT_ROOT_CAUSE, MAX_FIXES,
};
use crate::model::{AnalysisResult, Fix};
use crate::service::analysis::AnalysisError;

/// Locate the JSON object candidate inside raw completion text.
///
/// Returns the span from the first `{` to the last `}` that follows it. This
/// is not a balanced-brace scan, so trailing prose containing `}` is pulled
/// into the span. Text without such a span is returned unchanged.
pub fn extract_json_span(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => raw,
    }
}

/// Convert raw completion text into an [`AnalysisResult`]
pub fn normalize(raw: &str) -> Result<AnalysisResult, AnalysisError> {
    let span = extract_json_span(raw);

    let parsed: Value = serde_json::from_str(span)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    let object = parsed.as_object().ok_or_else(|| {
        AnalysisError::Processing(format!(
            "expected a JSON object in AI response, found {}",
            json_kind(&parsed)
        ))
    })?;

    let fixes = match object.get("fixes") {
        Some(Value::Array(items)) => items
            .iter()
            .take(MAX_FIXES)
            .map(read_fix)
            .collect::<Result<Vec<_>, _>>()?,
        _ => Vec::new(),
    };

    Ok(AnalysisResult {
        root_cause: string_field(object, "root_cause", DEFAULT_ROOT_CAUSE)?,
        error_type: string_field(object, "error_type", DEFAULT_ERROR_TYPE)?,
        fixes,
        explanation: string_field(object, "explanation", "")?,
    })
}

fn read_fix(item: &Value) -> Result<Fix, AnalysisError> {
    let object = item.as_object().ok_or_else(|| {
        AnalysisError::Processing(format!(
            "expected fix entries to be objects, found {}",
            json_kind(item)
        ))
    })?;

    Ok(Fix {
        fix: string_field(object, "fix", "")?,
        confidence: confidence_field(object)?,
        explanation: string_field(object, "explanation", "")?,
    })
}

// `null` is treated the same as a missing key.
fn string_field(
    object: &Map<String, Value>,
    name: &str,
    default: &str,
) -> Result<String, AnalysisError> {
    match object.get(name) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(AnalysisError::Processing(format!(
            "field `{}` must be a string, found {}",
            name,
            json_kind(other)
        ))),
    }
}

fn confidence_field(object: &Map<String, Value>) -> Result<f64, AnalysisError> {
    let invalid = |kind: &str| {
        AnalysisError::Processing(format!("field `confidence` must be a number, found {}", kind))
    };

    match object.get("confidence") {
        None | Some(Value::Null) => Ok(DEFAULT_CONFIDENCE),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid("number")),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid("string")),
        Some(other) => Err(invalid(json_kind(other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
