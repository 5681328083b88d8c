/// Types for AI-derived function metadata
///
/// A FunctionRecord is one discovered function/method with its complexity and
/// the model's insights. Records are immutable once created and belong to
/// exactly one project. Function names are not guaranteed unique within a
/// project; duplicates are preserved in source order rather than rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One AI-derived description of a discovered function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Row id assigned by the database
    pub id: i64,
    /// Owning project
    pub project_id: i64,
    /// Function or method name as reported by the model
    pub function_name: String,
    /// What the function does
    pub description: Option<String>,
    /// Parameter name → type mapping
    pub parameters: BTreeMap<String, String>,
    /// Declared or inferred return type
    pub return_type: Option<String>,
    /// Source file, when the model could determine one
    pub file_path: Option<String>,
    /// Estimated line number
    pub line_number: Option<i64>,
    /// Complexity estimate on a 1-10 scale
    pub complexity_score: Option<i64>,
    /// Model insights and improvement suggestions
    pub ai_analysis: Option<AiAnalysis>,
    /// Creation timestamp
    pub created_at: String,
}

/// Insight and suggestion lists produced by the model for one function
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Data for inserting a new function map row
#[derive(Debug, Clone)]
pub struct NewFunctionMap {
    pub project_id: i64,
    pub function_name: String,
    pub description: Option<String>,
    pub parameters: BTreeMap<String, String>,
    pub return_type: Option<String>,
    pub file_path: Option<String>,
    pub line_number: Option<i64>,
    pub complexity_score: Option<i64>,
    pub ai_analysis: Option<AiAnalysis>,
}

/// Result of one analysis run
///
/// Domain failures (no content, AI call failed) are values, not errors: the
/// route layer marks the owning project `failed` and surfaces the message.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Completed {
        function_count: usize,
        analysis_id: String,
    },
    Failed {
        error: String,
    },
}

/// Structured output contract for the LLM call
///
/// Mirrors the response schema sent to the model: a single `functions` array
/// with per-function metadata, complexity clamped to 1-10 by the schema.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionAnalysis {
    pub functions: Vec<AnalyzedFunction>,
}

/// One function as reported by the model
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedFunction {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    pub return_type: Option<String>,
    pub file_path: Option<String>,
    pub line_number: Option<i64>,
    pub complexity_score: i64,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzed_function_deserializes_camel_case() {
        let json = r#"{
            "name": "processUserData",
            "description": "Normalizes a raw user payload",
            "parameters": {"userData": "object"},
            "returnType": "object",
            "lineNumber": 3,
            "complexityScore": 4,
            "insights": ["validates email presence"],
            "suggestions": ["extract validation"]
        }"#;
        let f: AnalyzedFunction = serde_json::from_str(json).unwrap();
        assert_eq!(f.name, "processUserData");
        assert_eq!(f.return_type.as_deref(), Some("object"));
        assert_eq!(f.line_number, Some(3));
        assert_eq!(f.complexity_score, 4);
        assert!(f.file_path.is_none());
    }

    #[test]
    fn test_analyzed_function_defaults() {
        let f: AnalyzedFunction = serde_json::from_str(
            r#"{"name": "f", "description": "d", "complexityScore": 1}"#,
        )
        .unwrap();
        assert!(f.parameters.is_empty());
        assert!(f.insights.is_empty());
        assert!(f.suggestions.is_empty());
    }
}
