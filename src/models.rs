//! Wire types shared by the routes and the relay client
//!
//! Every endpoint exchanges one of these structs instead of loosely-shaped
//! JSON. Field names are camelCase on the wire to match the browser client.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// QA artifacts
// ============================================================================

/// One step of a test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    pub step_no: u32,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// A generated or stored test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub category: String,
    pub title: String,
    pub priority: String,
    #[serde(default)]
    pub preconditions: Vec<String>,
    #[serde(default)]
    pub steps: Vec<TestStep>,
    #[serde(default)]
    pub expected_result: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub estimated_time_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// A user story in the backlog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A tracked bug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps_to_reproduce: Vec<String>,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// A test plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestPlan {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A saved API request inside a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// A named collection of API requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCollection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub requests: Vec<ApiRequest>,
}

// ============================================================================
// Health
// ============================================================================

/// Response from `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub gemini_connected: bool,
    pub model: Option<String>,
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
}

// ============================================================================
// AI generation endpoints
// ============================================================================

/// Request for `POST /api/ai/generate-testcases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestCasesRequest {
    pub user_story: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Response from `POST /api/ai/generate-testcases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestCasesResponse {
    pub test_cases: Vec<TestCase>,
    pub model: String,
}

/// Target framework for script generation.
///
/// Unrecognized values fall back to Playwright rather than rejecting the
/// request, matching the prompt-table lookup in the original backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFramework {
    Playwright,
    Cypress,
    Selenium,
    Robot,
    #[serde(other)]
    Unknown,
}

/// Request for `POST /api/ai/generate-script` (streaming).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScriptRequest {
    pub framework: ScriptFramework,
    pub language: String,
    pub browser: String,
    pub headless: bool,
    pub use_fixtures: bool,
    pub scenario: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_request: Option<ApiRequest>,
}

/// Request for `POST /api/ai/audit-accessibility`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    pub url: String,
    pub scope: String,
}

/// One accessibility finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFinding {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub wcag_guideline: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub selector: String,
    #[serde(default)]
    pub suggested_fix: String,
}

/// Response from `POST /api/ai/audit-accessibility`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub score: u32,
    pub summary: String,
    #[serde(default)]
    pub findings: Vec<AuditFinding>,
}

/// Request for `POST /api/ai/summarize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub content: serde_json::Value,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Response from `POST /api/ai/summarize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Request half of an assertion-generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionRequestInfo {
    pub method: String,
    pub url: String,
}

/// Response half of an assertion-generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResponseInfo {
    pub status: u16,
    pub body: String,
}

/// Request for `POST /api/ai/generate-assertions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAssertionsRequest {
    pub request: AssertionRequestInfo,
    pub response: AssertionResponseInfo,
}

/// Response from `POST /api/ai/generate-assertions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateAssertionsResponse {
    pub assertions: Vec<String>,
}

/// Request for `POST /api/ai/elaborate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElaborateRequest {
    pub text: String,
    pub context: String,
    pub field: String,
}

/// Response from `POST /api/ai/elaborate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElaborateResponse {
    pub elaborated: String,
}

/// Request for `POST /api/ai/generate-from-notes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFromNotesRequest {
    pub notes: String,
    #[serde(rename = "type")]
    pub item_type: String,
}

/// Response from `POST /api/ai/generate-from-notes`.
///
/// The generated item keeps its raw JSON shape: user stories and bugs share
/// this endpoint and the caller knows which it asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateFromNotesResponse {
    pub generated: serde_json::Value,
}

// ============================================================================
// Outbound proxy
// ============================================================================

/// Request for `POST /api/proxy/execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyExecuteRequest {
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

/// Response from `POST /api/proxy/execute`.
///
/// Transport-level failures use status 0 so the caller can distinguish
/// "never reached the target" from any real HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyExecuteResponse {
    pub status: u16,
    pub status_text: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    pub body: String,
    pub time: u64,
}

// ============================================================================
// Artifact persistence
// ============================================================================

/// Request for `POST /api/data/test-cases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTestCasesRequest {
    pub test_cases: Vec<TestCase>,
}

/// Request for `POST /api/data/user-stories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveUserStoriesRequest {
    pub stories: Vec<UserStory>,
}

/// Request for `POST /api/data/bugs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveBugsRequest {
    pub bugs: Vec<Bug>,
}

/// Request for `POST /api/data/test-plans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTestPlansRequest {
    pub plans: Vec<TestPlan>,
}

/// Request for `POST /api/data/api-collections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveApiCollectionsRequest {
    pub collections: Vec<ApiCollection>,
}

/// Acknowledgement for all save endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
}
