/// Analysis orchestration over the content-fetch and LLM boundaries
///
/// Sequential flow per run: obtain source content (webpage scripts for
/// website projects, a fixed placeholder for codebase projects), make one
/// structured-output call to the Gemini API, then persist one function map
/// row per returned function. No retry is applied to the AI call and a run
/// cannot be cancelled once started.

use crate::analysis::storage::FunctionMapStorage;
use crate::analysis::types::{AiAnalysis, AnalysisOutcome, FunctionAnalysis, NewFunctionMap};
use crate::config::AnalysisConfig;
use crate::project::types::{Project, ProjectType};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

/// Matches inline script blocks in fetched HTML, body in capture group 1
static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>(.*?)</script>").unwrap());

/// Upper bound on the code excerpt sent to the model, in bytes
const MAX_CODE_CHARS: usize = 8000;

/// Stand-in source for codebase projects until a real repository fetch exists.
/// TODO: replace with a GitHub content fetch once repository credentials are modeled.
const CODEBASE_PLACEHOLDER: &str = r#"
function processUserData(userData) {
  if (!userData || !userData.email) {
    throw new Error('Invalid user data');
  }
  return {
    id: userData.id,
    email: userData.email.toLowerCase(),
    name: userData.name || 'Anonymous'
  };
}

async function saveToDatabase(data) {
  try {
    const result = await db.users.create(data);
    return result;
  } catch (error) {
    console.error('Database error:', error);
    throw error;
  }
}
"#;

/// Analysis service coordinating fetch, LLM call, and persistence
#[derive(Debug, Clone)]
pub struct AnalysisService {
    /// Function map persistence for discovered functions
    functions: FunctionMapStorage,
    /// Model endpoint settings
    config: AnalysisConfig,
    /// Shared HTTP client for content fetch and the AI call
    client: reqwest::Client,
}

impl AnalysisService {
    pub fn new(functions: FunctionMapStorage, config: AnalysisConfig) -> Self {
        Self {
            functions,
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Run a full analysis for one project
    ///
    /// Domain failures come back as `AnalysisOutcome::Failed` with the cause
    /// message; the caller is responsible for marking the project `failed` in
    /// that case and `completed` otherwise.
    pub async fn analyze_project(&self, project: &Project, analysis_type: &str) -> AnalysisOutcome {
        tracing::info!(
            "🔍 Starting {} analysis for project {} ({})",
            analysis_type,
            project.id,
            project.name
        );

        let code_content = match self.fetch_source_content(project).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Content fetch failed for project {}: {:#}", project.id, e);
                return AnalysisOutcome::Failed {
                    error: format!("Failed to fetch source content: {}", e),
                };
            }
        };

        if code_content.trim().is_empty() {
            return AnalysisOutcome::Failed {
                error: "No code content found to analyze".to_string(),
            };
        }

        let analysis = match self
            .analyze_code_with_ai(&code_content, project.project_type.as_str())
            .await
        {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::error!("AI analysis failed for project {}: {:#}", project.id, e);
                return AnalysisOutcome::Failed {
                    error: "Failed to analyze code with AI".to_string(),
                };
            }
        };

        let mut function_count = 0;
        for func in analysis.functions {
            let record = NewFunctionMap {
                project_id: project.id,
                function_name: func.name,
                description: Some(func.description),
                parameters: func.parameters,
                return_type: func.return_type,
                file_path: func.file_path,
                line_number: func.line_number,
                complexity_score: Some(func.complexity_score),
                ai_analysis: Some(AiAnalysis {
                    insights: func.insights,
                    suggestions: func.suggestions,
                }),
            };
            if let Err(e) = self.functions.create_function_map(&record).await {
                tracing::error!("Failed to store function map for project {}: {:#}", project.id, e);
                return AnalysisOutcome::Failed {
                    error: "Failed to store analysis results".to_string(),
                };
            }
            function_count += 1;
        }

        let analysis_id = format!(
            "analysis_{}_{}",
            project.id,
            chrono::Utc::now().timestamp_millis()
        );
        tracing::info!(
            "✅ Analysis {} complete: {} functions discovered",
            analysis_id,
            function_count
        );

        AnalysisOutcome::Completed {
            function_count,
            analysis_id,
        }
    }

    /// Obtain source content for a project based on its type
    async fn fetch_source_content(&self, project: &Project) -> Result<String> {
        match project.project_type {
            ProjectType::Website => {
                let url = project
                    .url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("Website project has no URL"))?;
                self.fetch_website_scripts(url).await
            }
            // Codebase fetch is an explicit stub at this boundary
            ProjectType::Codebase => Ok(CODEBASE_PLACEHOLDER.to_string()),
        }
    }

    /// Fetch a webpage and extract its inline script bodies
    async fn fetch_website_scripts(&self, url: &str) -> Result<String> {
        tracing::debug!("🌐 Fetching website content: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Request to '{}' failed: {}", url, e))?;
        let html = response
            .text()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read response body: {}", e))?;

        Ok(extract_scripts(&html))
    }

    /// Make one structured-output call to the Gemini generateContent endpoint
    ///
    /// The response schema pins the model to the function map shape; the
    /// returned JSON text is decoded straight into `FunctionAnalysis`.
    async fn analyze_code_with_ai(&self, code: &str, project_type: &str) -> Result<FunctionAnalysis> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is not configured"))?;

        let excerpt = truncate_excerpt(code, MAX_CODE_CHARS);
        let prompt = format!(
            "Analyze the following {} code and extract all functions, methods, and \
             significant code blocks. For each function found, provide: the function \
             name, a description of what it does, parameters and their types, return \
             type if applicable, file path if determinable, an estimated line number, \
             a complexity score from 1 to 10 where 10 is most complex, key insights \
             about the function, and suggestions for improvement.\n\n\
             Code to analyze:\n{}",
            project_type, excerpt
        );

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.config.model, api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": function_analysis_schema(),
            }
        });

        tracing::debug!("🤖 Calling model {} ({} byte excerpt)", self.config.model, excerpt.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("AI request failed: {}", e))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to decode AI response: {}", e))?;

        if !status.is_success() {
            return Err(anyhow::anyhow!("AI call returned {}: {}", status, payload));
        }

        let text = payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("AI response contained no candidate text"))?;

        let analysis: FunctionAnalysis = serde_json::from_str(text)
            .map_err(|e| anyhow::anyhow!("AI response did not match schema: {}", e))?;

        Ok(analysis)
    }
}

/// Pull inline script bodies out of an HTML document
///
/// Non-empty bodies are joined with blank lines; a fixed marker string is
/// returned when the page has no inline JavaScript so the caller still has
/// content to send to the model.
pub fn extract_scripts(html: &str) -> String {
    let scripts: Vec<&str> = SCRIPT_BLOCK
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.trim().is_empty())
        .collect();

    if scripts.is_empty() {
        "No JavaScript content found".to_string()
    } else {
        scripts.join("\n\n")
    }
}

/// Truncate to a byte budget without splitting a UTF-8 character
fn truncate_excerpt(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Response schema for the structured-output call
///
/// Gemini schema dialect: uppercase type names, min/max on the complexity
/// score. Field names are camelCase to match `AnalyzedFunction`'s serde
/// renames.
fn function_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "functions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "parameters": {
                            "type": "OBJECT",
                            "additionalProperties": { "type": "STRING" }
                        },
                        "returnType": { "type": "STRING" },
                        "filePath": { "type": "STRING" },
                        "lineNumber": { "type": "INTEGER" },
                        "complexityScore": { "type": "INTEGER", "minimum": 1, "maximum": 10 },
                        "insights": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["name", "description", "complexityScore"]
                }
            }
        },
        "required": ["functions"]
    })
}
