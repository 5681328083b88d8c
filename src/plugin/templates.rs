/// Plugin script templates
///
/// Pure string composition, no I/O: the renderers take a project, its
/// function records, the config name, and the generation timestamp, and
/// return the full script text. The advanced template is assembled from
/// typed fragment builders selected by feature flags and concatenated in a
/// fixed order (performance block, error block, lookup routines, visual
/// indicator, init wiring), so output stays syntactically stable for every
/// feature combination — unrequested options contribute empty text.
///
/// Project and config names are spliced verbatim into single-quoted JS
/// strings. Inputs containing quotes or backslashes will break the generated
/// script; the renderer does not validate or escape them.

use crate::analysis::types::FunctionRecord;
use crate::plugin::types::plugin_file_name;
use crate::project::types::Project;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Template version embedded by the basic renderer
pub const BASIC_VERSION: &str = "1.0.0";
/// Template version embedded by the advanced renderer
pub const ADVANCED_VERSION: &str = "1.1.0";

/// Feature identifier for the DOM overlay affordance
pub const FEATURE_VISUAL_INDICATOR: &str = "visual-indicator";
/// Feature identifier for performance sampling and reports
pub const FEATURE_PERFORMANCE_MONITORING: &str = "performance-monitoring";
/// Feature identifier for error capture and reports
pub const FEATURE_ERROR_TRACKING: &str = "error-tracking";

/// One entry of the generated script's `insights` array
///
/// Optional fields absent from the record are omitted from the JSON rather
/// than emitted as null.
#[derive(Debug, Serialize)]
struct InsightEntry<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    complexity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insights: Option<&'a [String]>,
    suggestions: &'a [String],
}

/// Serialize the insights array, one entry per record in input order
///
/// `with_insights` controls whether the per-function insight strings are
/// included (advanced template) or only suggestions (basic template).
fn insights_json(functions: &[FunctionRecord], with_insights: bool) -> String {
    static EMPTY: [String; 0] = [];

    let entries: Vec<InsightEntry<'_>> = functions
        .iter()
        .map(|f| {
            let analysis = f.ai_analysis.as_ref();
            InsightEntry {
                name: &f.function_name,
                description: f.description.as_deref(),
                complexity: f.complexity_score,
                insights: if with_insights {
                    Some(analysis.map(|a| a.insights.as_slice()).unwrap_or(&EMPTY))
                } else {
                    None
                },
                suggestions: analysis.map(|a| a.suggestions.as_slice()).unwrap_or(&EMPTY),
            }
        })
        .collect();

    // to_string_pretty cannot fail for these value types
    serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// Render the basic plugin script
///
/// Exposes `window.CodeInsight` with `projectName`, `version`, the insights
/// array, first-match `getFunctionInsights`, and a console dump routine,
/// installed as soon as the hosting page's content is ready.
pub fn render_basic(
    project: &Project,
    functions: &[FunctionRecord],
    config_name: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let header = header_fragment("Basic", project, config_name, BASIC_VERSION, None, generated_at);
    let insights = insights_json(functions, false);

    format!(
        r#"{header}
(function(window) {{
  'use strict';

  const CodeInsightPlugin = {{
    projectName: '{project_name}',
    version: '{version}',

    insights: {insights},

    getFunctionInsights: function(functionName) {{
      return this.insights.find(f => f.name === functionName) || null;
    }},

    showAllInsights: function() {{
      console.group('🤖 Code Insights');
      this.insights.forEach(insight => {{
        console.log(`${{insight.name}}: ${{insight.description}}`);
      }});
      console.groupEnd();
    }},

    init: function() {{
      console.log('🤖 Code Insight plugin initialized');
      window.CodeInsight = this;
      return this;
    }}
  }};

  // Auto-initialize
  if (document.readyState === 'loading') {{
    document.addEventListener('DOMContentLoaded', () => CodeInsightPlugin.init());
  }} else {{
    CodeInsightPlugin.init();
  }}

}})(window);
"#,
        header = header,
        project_name = project.name,
        version = BASIC_VERSION,
        insights = insights,
    )
}

/// Render the advanced plugin script with the requested feature set
///
/// Unknown feature identifiers still appear in the script's `features` array
/// but contribute no code fragment; they are ignored, not rejected.
pub fn render_advanced(
    project: &Project,
    functions: &[FunctionRecord],
    config_name: &str,
    features: &[String],
    generated_at: DateTime<Utc>,
) -> String {
    let has_visual_indicator = features.iter().any(|f| f == FEATURE_VISUAL_INDICATOR);
    let has_performance = features.iter().any(|f| f == FEATURE_PERFORMANCE_MONITORING);
    let has_error_tracking = features.iter().any(|f| f == FEATURE_ERROR_TRACKING);

    let header = header_fragment(
        "Advanced",
        project,
        config_name,
        ADVANCED_VERSION,
        Some(features),
        generated_at,
    );
    let features_json = serde_json::to_string(features).unwrap_or_else(|_| "[]".to_string());
    let insights = insights_json(functions, true);

    let performance_fragment = if has_performance { PERFORMANCE_FRAGMENT } else { "" };
    let error_fragment = if has_error_tracking { ERROR_FRAGMENT } else { "" };
    let show_performance = if has_performance { SHOW_PERFORMANCE_FRAGMENT } else { "" };
    let indicator_fragment = if has_visual_indicator { INDICATOR_FRAGMENT } else { "" };
    let init_indicator = if has_visual_indicator {
        "\n      this.addVisualIndicator();\n"
    } else {
        ""
    };
    let init_error_hook = if has_error_tracking { INIT_ERROR_HOOK_FRAGMENT } else { "" };

    format!(
        r#"{header}
(function(window) {{
  'use strict';

  const CodeInsightPlugin = {{
    projectName: '{project_name}',
    version: '{version}',
    features: {features_json},

    insights: {insights},
{performance_fragment}{error_fragment}
    getFunctionInsights: function(functionName) {{
      return this.insights.find(f => f.name === functionName) || null;
    }},

    showInsights: function(functionName) {{
      if (functionName) {{
        const insight = this.getFunctionInsights(functionName);
        if (insight) {{
          console.group('🤖 Code Insights for ' + functionName);
          console.log('Description:', insight.description);
          console.log('Complexity:', insight.complexity + '/10');
          console.log('Insights:', insight.insights);
          console.log('Suggestions:', insight.suggestions);
{show_performance}          console.groupEnd();
        }}
      }} else {{
        console.group('🤖 All Code Insights');
        this.insights.forEach(f => {{
          console.log(`${{f.name}} (Complexity: ${{f.complexity}}/10): ${{f.description}}`);
        }});
        console.groupEnd();
      }}
    }},
{indicator_fragment}
    init: function() {{
      console.log('🤖 Code Insight plugin initialized for:', this.projectName);
      console.log('Features enabled:', this.features);

      window.CodeInsight = this;
{init_indicator}{init_error_hook}
      return this;
    }}
  }};

  // Auto-initialize
  if (document.readyState === 'loading') {{
    document.addEventListener('DOMContentLoaded', () => CodeInsightPlugin.init());
  }} else {{
    CodeInsightPlugin.init();
  }}

}})(window);
"#,
        header = header,
        project_name = project.name,
        version = ADVANCED_VERSION,
        features_json = features_json,
        insights = insights,
        performance_fragment = performance_fragment,
        error_fragment = error_fragment,
        show_performance = show_performance,
        indicator_fragment = indicator_fragment,
        init_indicator = init_indicator,
        init_error_hook = init_error_hook,
    )
}

/// Header comment carrying the round-trip contract
///
/// Embeds the exact config name and version that the download endpoint uses
/// for the filename, plus a ready-to-paste script tag.
fn header_fragment(
    variant: &str,
    project: &Project,
    config_name: &str,
    version: &str,
    features: Option<&[String]>,
    generated_at: DateTime<Utc>,
) -> String {
    let features_line = match features {
        Some(features) => format!(" * Features: {}\n", features.join(", ")),
        None => String::new(),
    };
    format!(
        "/**\n * Code Insight - {variant} Plugin: {config_name}\n * Generated for: {project_name}\n * Version: {version}\n{features_line} * Generated on: {generated_at}\n * Usage: <script src=\"{file_name}\"></script>\n */\n",
        variant = variant,
        config_name = config_name,
        project_name = project.name,
        version = version,
        features_line = features_line,
        generated_at = generated_at.to_rfc3339(),
        file_name = plugin_file_name(config_name, version),
    )
}

/// Performance sampling members: per-function duration samples plus an
/// aggregate report (null when no samples exist)
const PERFORMANCE_FRAGMENT: &str = r#"
    performanceData: {},

    trackPerformance: function(functionName, startTime, endTime) {
      if (!this.performanceData[functionName]) {
        this.performanceData[functionName] = [];
      }
      this.performanceData[functionName].push({
        duration: endTime - startTime,
        timestamp: Date.now()
      });
    },

    getPerformanceReport: function(functionName) {
      const data = this.performanceData[functionName] || [];
      if (data.length === 0) return null;

      const durations = data.map(d => d.duration);
      return {
        calls: data.length,
        avgDuration: durations.reduce((a, b) => a + b, 0) / durations.length,
        minDuration: Math.min(...durations),
        maxDuration: Math.max(...durations)
      };
    },
"#;

/// Error capture members: append-only error log, report with total count,
/// the 10 most recent entries, and a per-function tally
const ERROR_FRAGMENT: &str = r#"
    errors: [],

    trackError: function(error, functionName) {
      this.errors.push({
        error: error.message,
        function: functionName,
        timestamp: Date.now(),
        stack: error.stack
      });
    },

    getErrorReport: function() {
      return {
        totalErrors: this.errors.length,
        recentErrors: this.errors.slice(-10),
        errorsByFunction: this.errors.reduce((acc, err) => {
          acc[err.function] = (acc[err.function] || 0) + 1;
          return acc;
        }, {})
      };
    },
"#;

/// Per-function performance line spliced into showInsights when the
/// performance feature is active
const SHOW_PERFORMANCE_FRAGMENT: &str = r#"          const perf = this.getPerformanceReport(functionName);
          if (perf) {
            console.log('Performance:', perf);
          }
"#;

/// Fixed-position DOM overlay; clicking it dumps insights for all functions
const INDICATOR_FRAGMENT: &str = r#"
    addVisualIndicator: function() {
      const indicator = document.createElement('div');
      indicator.innerHTML = '🤖 Code Insights';
      indicator.style.cssText = `
        position: fixed;
        top: 20px;
        right: 20px;
        background: linear-gradient(135deg, #0891b2, #0e7490);
        color: white;
        padding: 12px 16px;
        border-radius: 8px;
        font-size: 14px;
        font-weight: 600;
        z-index: 10000;
        cursor: pointer;
        box-shadow: 0 4px 12px rgba(8, 145, 178, 0.3);
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      `;

      indicator.onclick = () => this.showInsights();
      document.body.appendChild(indicator);
    },
"#;

/// Global uncaught-error listener forwarding to trackError
const INIT_ERROR_HOOK_FRAGMENT: &str = r#"
      window.addEventListener('error', (event) => {
        this.trackError(event.error, 'global');
      });
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::AiAnalysis;
    use chrono::TimeZone;

    fn test_project(name: &str) -> Project {
        Project {
            id: 1,
            name: name.to_string(),
            description: None,
            url: None,
            project_type: crate::project::types::ProjectType::Website,
            status: crate::project::types::ProjectStatus::Completed,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn test_function(name: &str, description: &str, complexity: i64) -> FunctionRecord {
        FunctionRecord {
            id: 0,
            project_id: 1,
            function_name: name.to_string(),
            description: Some(description.to_string()),
            parameters: Default::default(),
            return_type: None,
            file_path: None,
            line_number: None,
            complexity_score: Some(complexity),
            ai_analysis: Some(AiAnalysis {
                insights: vec![],
                suggestions: vec!["s1".to_string()],
            }),
            created_at: String::new(),
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    /// Every opener must have a closer regardless of feature combination
    fn assert_balanced(code: &str) {
        for (open, close) in [('{', '}'), ('(', ')'), ('[', ']')] {
            let opens = code.matches(open).count();
            let closes = code.matches(close).count();
            assert_eq!(opens, closes, "unbalanced '{}' in:\n{}", open, code);
        }
    }

    #[test]
    fn test_basic_embeds_project_name_and_entries_in_order() {
        let functions = vec![
            test_function("alpha", "first fn", 2),
            test_function("beta", "second fn", 5),
        ];
        let code = render_basic(&test_project("Acme"), &functions, "demo", fixed_time());

        assert!(code.contains("projectName: 'Acme'"));
        assert!(code.contains("version: '1.0.0'"));
        let alpha_pos = code.find("\"alpha\"").unwrap();
        let beta_pos = code.find("\"beta\"").unwrap();
        assert!(alpha_pos < beta_pos);
        assert_balanced(&code);
    }

    #[test]
    fn test_basic_end_to_end_scenario() {
        let functions = vec![test_function("foo", "d", 3)];
        let code = render_basic(&test_project("Acme"), &functions, "demo", fixed_time());

        assert!(code.contains("projectName: 'Acme'"));
        assert!(code.contains("\"name\": \"foo\""));
        assert!(code.contains("\"description\": \"d\""));
        assert!(code.contains("\"complexity\": 3"));
        assert!(code.contains("\"suggestions\": [\n      \"s1\"\n    ]"));
        // Basic entries carry no per-function insight list
        assert!(!code.contains("\"insights\": ["));
    }

    #[test]
    fn test_basic_omits_absent_optional_fields() {
        let mut f = test_function("bare", "", 1);
        f.description = None;
        f.complexity_score = None;
        f.ai_analysis = None;
        let code = render_basic(&test_project("Acme"), &[f], "demo", fixed_time());

        assert!(!code.contains("\"description\""));
        assert!(!code.contains("\"complexity\""));
        // Suggestions still default to an empty array
        assert!(code.contains("\"suggestions\": []"));
    }

    #[test]
    fn test_header_round_trip_contract() {
        let code = render_basic(&test_project("Acme"), &[], "My Plugin!", fixed_time());
        assert!(code.contains("Basic Plugin: My Plugin!"));
        assert!(code.contains("<script src=\"My_Plugin__v1.0.0.js\"></script>"));
        assert!(code.contains("Version: 1.0.0"));
    }

    #[test]
    fn test_advanced_all_eight_feature_subsets_are_well_formed() {
        let all = [
            FEATURE_VISUAL_INDICATOR,
            FEATURE_PERFORMANCE_MONITORING,
            FEATURE_ERROR_TRACKING,
        ];
        let functions = vec![test_function("foo", "d", 3)];

        for mask in 0u8..8 {
            let features: Vec<String> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, f)| f.to_string())
                .collect();

            let code = render_advanced(
                &test_project("Acme"),
                &functions,
                "combo",
                &features,
                fixed_time(),
            );
            assert_balanced(&code);
            assert!(code.contains("version: '1.1.0'"));

            assert_eq!(
                code.contains("addVisualIndicator"),
                features.iter().any(|f| f == FEATURE_VISUAL_INDICATOR),
                "indicator fragment mismatch for {:?}",
                features
            );
            assert_eq!(
                code.contains("trackPerformance"),
                features.iter().any(|f| f == FEATURE_PERFORMANCE_MONITORING),
                "performance fragment mismatch for {:?}",
                features
            );
            assert_eq!(
                code.contains("trackError"),
                features.iter().any(|f| f == FEATURE_ERROR_TRACKING),
                "error fragment mismatch for {:?}",
                features
            );
        }
    }

    #[test]
    fn test_advanced_performance_extends_show_insights() {
        let with = render_advanced(
            &test_project("Acme"),
            &[],
            "p",
            &[FEATURE_PERFORMANCE_MONITORING.to_string()],
            fixed_time(),
        );
        assert!(with.contains("const perf = this.getPerformanceReport(functionName);"));
        assert!(with.contains("avgDuration: durations.reduce((a, b) => a + b, 0) / durations.length"));
        assert!(with.contains("if (data.length === 0) return null;"));

        let without = render_advanced(&test_project("Acme"), &[], "p", &[], fixed_time());
        assert!(!without.contains("getPerformanceReport"));
    }

    #[test]
    fn test_advanced_error_tracking_wires_global_hook() {
        let code = render_advanced(
            &test_project("Acme"),
            &[],
            "e",
            &[FEATURE_ERROR_TRACKING.to_string()],
            fixed_time(),
        );
        assert!(code.contains("window.addEventListener('error'"));
        assert!(code.contains("recentErrors: this.errors.slice(-10)"));
        assert!(code.contains("errorsByFunction"));
    }

    #[test]
    fn test_unknown_features_listed_but_inert() {
        let features = vec!["telemetry-2000".to_string()];
        let code = render_advanced(&test_project("Acme"), &[], "u", &features, fixed_time());

        assert!(code.contains("features: [\"telemetry-2000\"]"));
        assert!(!code.contains("trackPerformance"));
        assert!(!code.contains("trackError"));
        assert!(!code.contains("addVisualIndicator"));
        assert_balanced(&code);
    }

    #[test]
    fn test_advanced_entries_carry_insight_lists() {
        let mut f = test_function("foo", "d", 3);
        f.ai_analysis = Some(AiAnalysis {
            insights: vec!["pure function".to_string()],
            suggestions: vec![],
        });
        let code = render_advanced(&test_project("Acme"), &[f], "a", &[], fixed_time());
        assert!(code.contains("\"insights\": [\n      \"pure function\"\n    ]"));
    }

    #[test]
    fn test_duplicate_names_keep_source_order() {
        // The generated lookup scans the array front to back, so the first
        // record with a given name must serialize first.
        let functions = vec![
            test_function("handler", "first", 1),
            test_function("handler", "second", 9),
        ];
        let code = render_advanced(&test_project("Acme"), &functions, "dup", &[], fixed_time());

        let first = code.find("\"description\": \"first\"").unwrap();
        let second = code.find("\"description\": \"second\"").unwrap();
        assert!(first < second);
        assert!(code.contains("this.insights.find(f => f.name === functionName)"));
    }
}
