/// AI-based code analysis layer
///
/// Fetches source content for a project, runs it through a structured-output
/// LLM call, and persists one function map row per discovered function.

pub mod service;
pub mod storage;
pub mod types;

pub use service::AnalysisService;
pub use storage::FunctionMapStorage;
pub use types::{AiAnalysis, AnalysisOutcome, FunctionRecord, NewFunctionMap};
