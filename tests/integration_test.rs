//! Integration tests for codeinsight
//!
//! These tests verify the end-to-end workflow of storing analysis results
//! and generating downloadable plugins from them.

use chrono::{TimeZone, Utc};
use codeinsight::analysis::{AiAnalysis, FunctionMapStorage, NewFunctionMap};
use codeinsight::dashboard::DashboardStorage;
use codeinsight::db;
use codeinsight::plugin::types::NewPluginConfig;
use codeinsight::plugin::{PluginGenerator, PluginStorage};
use codeinsight::project::{NewProject, ProjectStatus, ProjectStorage, ProjectType};
use tempfile::tempdir;

/// Helper holding every storage layer over one database
struct TestEnv {
    projects: ProjectStorage,
    functions: FunctionMapStorage,
    plugins: PluginStorage,
    dashboard: DashboardStorage,
}

async fn setup_env() -> TestEnv {
    let pool = db::connect_in_memory().await.unwrap();
    TestEnv {
        projects: ProjectStorage::new(pool.clone()),
        functions: FunctionMapStorage::new(pool.clone()),
        plugins: PluginStorage::new(pool.clone()),
        dashboard: DashboardStorage::new(pool),
    }
}

fn acme_project() -> NewProject {
    NewProject {
        name: "Acme".to_string(),
        description: Some("Storefront".to_string()),
        url: Some("https://acme.example".to_string()),
        project_type: ProjectType::Website,
    }
}

fn foo_function(project_id: i64) -> NewFunctionMap {
    NewFunctionMap {
        project_id,
        function_name: "foo".to_string(),
        description: Some("d".to_string()),
        parameters: Default::default(),
        return_type: None,
        file_path: None,
        line_number: None,
        complexity_score: Some(3),
        ai_analysis: Some(AiAnalysis {
            insights: vec![],
            suggestions: vec!["s1".to_string()],
        }),
    }
}

#[tokio::test]
async fn test_end_to_end_basic_plugin_generation() {
    let env = setup_env().await;

    // Project with one analyzed function
    let project = env.projects.create_project(&acme_project()).await.unwrap();
    env.projects.update_status(project.id, ProjectStatus::Completed).await.unwrap();
    env.functions.create_function_map(&foo_function(project.id)).await.unwrap();

    // Generate without features → basic template
    let project = env.projects.get_project(project.id).await.unwrap().unwrap();
    let functions = env.functions.list_by_project(project.id).await.unwrap();
    let generated = PluginGenerator::generate(
        &project,
        &functions,
        "Acme Insights",
        None,
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
    );

    assert_eq!(generated.version, "1.0.0");
    assert!(generated.code.contains("projectName: 'Acme'"));
    assert!(generated.code.contains("\"name\": \"foo\""));
    assert!(generated.code.contains("\"description\": \"d\""));
    assert!(generated.code.contains("\"complexity\": 3"));
    assert!(generated.code.contains("\"s1\""));

    // Persist and read back through the download path
    let stored = env
        .plugins
        .create_plugin_config(&NewPluginConfig {
            project_id: project.id,
            config_name: "Acme Insights".to_string(),
            plugin_code: generated.code.clone(),
            version: generated.version.clone(),
            is_active: true,
        })
        .await
        .unwrap();

    let fetched = env.plugins.get_plugin_config(stored.id).await.unwrap().unwrap();
    assert_eq!(fetched.plugin_code, generated.code);
    assert_eq!(fetched.file_name(), "Acme_Insights_v1.0.0.js");
    // Round-trip invariant: the stored code embeds its own download filename
    assert!(fetched.plugin_code.contains(&fetched.file_name()));
}

#[tokio::test]
async fn test_end_to_end_advanced_plugin_with_features() {
    let env = setup_env().await;

    let project = env.projects.create_project(&acme_project()).await.unwrap();
    env.functions.create_function_map(&foo_function(project.id)).await.unwrap();

    let project = env.projects.get_project(project.id).await.unwrap().unwrap();
    let functions = env.functions.list_by_project(project.id).await.unwrap();
    let features = vec![
        "performance-monitoring".to_string(),
        "error-tracking".to_string(),
    ];
    let generated = PluginGenerator::generate(
        &project,
        &functions,
        "tracker",
        Some(&features),
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
    );

    assert_eq!(generated.version, "1.1.0");
    assert!(generated.code.contains("trackPerformance"));
    assert!(generated.code.contains("trackError"));
    assert!(!generated.code.contains("addVisualIndicator"));
    assert!(generated.code.contains("features: [\"performance-monitoring\",\"error-tracking\"]"));
}

#[tokio::test]
async fn test_stats_and_activity_reflect_generation() {
    let env = setup_env().await;

    let project = env.projects.create_project(&acme_project()).await.unwrap();
    env.projects.update_status(project.id, ProjectStatus::Completed).await.unwrap();
    env.functions.create_function_map(&foo_function(project.id)).await.unwrap();
    env.plugins
        .create_plugin_config(&NewPluginConfig {
            project_id: project.id,
            config_name: "demo".to_string(),
            plugin_code: String::new(),
            version: "1.0.0".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

    let stats = env.dashboard.project_stats().await.unwrap();
    assert_eq!(stats.total_projects, 1);
    assert_eq!(stats.completed_analyses, 1);
    assert_eq!(stats.functions_analyzed, 1);
    assert_eq!(stats.plugins_generated, 1);

    let activity = env.dashboard.recent_activity(10).await.unwrap();
    assert!(activity.iter().any(|e| e.kind == "plugin_generated"));
    assert!(activity
        .iter()
        .any(|e| e.kind == "analysis_completed" && e.details.as_deref() == Some("Found 1 functions")));
}

#[tokio::test]
async fn test_file_backed_database_persists_across_pools() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("codeinsight.db");
    let db_path = db_path.to_str().unwrap();

    {
        let pool = db::connect(db_path).await.unwrap();
        db::init_schema(&pool).await.unwrap();
        let projects = ProjectStorage::new(pool.clone());
        projects.create_project(&acme_project()).await.unwrap();
        pool.close().await;
    }

    let pool = db::connect(db_path).await.unwrap();
    db::init_schema(&pool).await.unwrap();
    let projects = ProjectStorage::new(pool);
    let listed = projects.list_projects().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Acme");
    assert_eq!(listed[0].status, ProjectStatus::Pending);
}
