//! Prompt templates for the generation endpoints
//!
//! Each endpoint pairs a fixed system prompt with the request fields. The
//! model is instructed to answer with bare JSON (or bare code for scripts);
//! the routes extract that JSON out of whatever prose surrounds it.

use crate::models::{
    AuditRequest, ElaborateRequest, GenerateAssertionsRequest, GenerateFromNotesRequest,
    GenerateScriptRequest, GenerateTestCasesRequest, ScriptFramework, SummarizeRequest,
};

const TEST_CASES_SYSTEM: &str = r#"You are an expert QA engineer. Generate comprehensive test cases from the provided user story or requirements.
Return ONLY a valid JSON array of test case objects with this exact structure:
[{
  "id": "TC-001",
  "category": "Functional",
  "title": "Test case title",
  "priority": "High",
  "preconditions": ["Precondition 1"],
  "steps": [{"stepNo": 1, "action": "Action description", "data": "optional test data"}],
  "expectedResult": "Expected outcome",
  "tags": ["tag1", "tag2"],
  "estimatedTimeMinutes": 5
}]

IMPORTANT: Generate a balanced mix of test cases with these categories:
- "Functional" - Happy path, positive scenarios (3-4 test cases)
- "Negative" - Invalid inputs, error handling, failure scenarios (2-3 test cases)
- "Edge Case" - Boundary conditions, limits, unusual scenarios (2-3 test cases)
- "Error Handling" - System errors, validation errors (1-2 test cases)

Generate 8-12 test cases total. Make sure to include BOTH positive AND negative test cases."#;

const SCRIPT_PLAYWRIGHT: &str = "Generate ONLY the code. No explanations, no markdown, no comments outside the code. Return clean, production-ready Playwright test code that can be copied and run directly. Use page.getByRole, getByLabel for locators. Include setup/teardown and meaningful assertions.";
const SCRIPT_CYPRESS: &str = "Generate ONLY the code. No explanations, no markdown, no comments outside the code. Return clean, production-ready Cypress test code that can be copied and run directly. Use cy.get with data-testid selectors. Include beforeEach/afterEach hooks.";
const SCRIPT_SELENIUM: &str = "Generate ONLY the code. No explanations, no markdown, no comments outside the code. Return clean, production-ready Selenium test code that can be copied and run directly. Use explicit waits and proper locator strategies.";
const SCRIPT_ROBOT: &str = "Generate ONLY the code. No explanations, no markdown, no comments outside the code. Return clean, production-ready Robot Framework test code that can be copied and run directly.";

const ACCESSIBILITY_SYSTEM: &str = r#"You are an accessibility expert. Analyze the provided content and return a JSON object:
{
  "score": 0-100,
  "summary": "Brief summary of accessibility status",
  "findings": [{
    "id": "A11Y-001",
    "title": "Issue title",
    "wcagGuideline": "WCAG 2.1 guideline reference",
    "severity": "Error" or "Warning",
    "snippet": "<html snippet>",
    "selector": "CSS selector",
    "suggestedFix": "How to fix this issue"
  }]
}"#;

const ASSERTIONS_SYSTEM: &str = "Generate sensible API test assertions based on the request and response. Return a JSON array of assertion strings that can be used in test code.";

const ELABORATE_SYSTEM: &str = "Elaborate and improve the provided text while maintaining its meaning. Make it more detailed and professional.";

const FROM_NOTES_SYSTEM: &str = "Parse the provided notes and generate a structured item. For user stories, include title, description, acceptanceCriteria, priority, and tags. For bugs, include title, description, stepsToReproduce, severity, priority, and environment. Return as JSON.";

/// System prompt for the requested script framework.
fn script_system(framework: ScriptFramework) -> &'static str {
    match framework {
        ScriptFramework::Cypress => SCRIPT_CYPRESS,
        ScriptFramework::Selenium => SCRIPT_SELENIUM,
        ScriptFramework::Robot => SCRIPT_ROBOT,
        // Unknown frameworks fall back to the Playwright prompt
        ScriptFramework::Playwright | ScriptFramework::Unknown => SCRIPT_PLAYWRIGHT,
    }
}

fn framework_label(framework: ScriptFramework) -> &'static str {
    match framework {
        ScriptFramework::Playwright => "playwright",
        ScriptFramework::Cypress => "cypress",
        ScriptFramework::Selenium => "selenium",
        ScriptFramework::Robot => "robot",
        ScriptFramework::Unknown => "playwright",
    }
}

/// Build the test case generation prompt.
pub fn test_cases(req: &GenerateTestCasesRequest) -> String {
    let mut prompt = format!("{}\n\nUser Story: {}\n", TEST_CASES_SYSTEM, req.user_story);
    if let Some(title) = &req.title {
        prompt.push_str(&format!("Title: {}\n", title));
    }
    if let Some(epic) = &req.epic {
        prompt.push_str(&format!("Epic: {}\n", epic));
    }
    if let Some(priority) = &req.priority {
        prompt.push_str(&format!("Default Priority: {}\n", priority));
    }
    prompt.push_str("\nGenerate test cases as a JSON array:");
    prompt
}

/// Build the script generation prompt.
pub fn script(req: &GenerateScriptRequest) -> String {
    let mut prompt = format!(
        "{}\n\nIMPORTANT: Return ONLY the code. No markdown code blocks, no explanations before or after, no \"Here's the code\" text. Just the raw code that can be copied directly into a file.\n\nFramework: {}\nLanguage: {}\nBrowser: {}\nHeadless: {}\nUse Fixtures: {}\n\nTest Scenario:\n{}\n",
        script_system(req.framework),
        framework_label(req.framework),
        req.language,
        req.browser,
        req.headless,
        req.use_fixtures,
        req.scenario,
    );
    if let Some(test_data) = &req.test_data {
        prompt.push_str(&format!("\nTest Data (CSV):\n{}\n", test_data));
    }
    if let Some(api_request) = &req.api_request {
        let json = serde_json::to_string_pretty(api_request).unwrap_or_default();
        prompt.push_str(&format!("\nAPI Request:\n{}\n", json));
    }
    prompt.push_str("\nOutput the code now:");
    prompt
}

/// Build the accessibility audit prompt.
pub fn accessibility_audit(req: &AuditRequest) -> String {
    format!(
        "{}\n\nAnalyze the accessibility of a webpage at: {}\nScope: {}\n\nSince I cannot actually fetch the webpage, generate a realistic accessibility audit report based on common issues found on typical websites. Include 5-8 findings with a mix of errors and warnings.\n\nReturn the JSON object:",
        ACCESSIBILITY_SYSTEM, req.url, req.scope,
    )
}

/// Build the summarization prompt.
pub fn summarize(req: &SummarizeRequest) -> String {
    let content_type = req.content_type.as_deref().unwrap_or("content");
    format!(
        "Summarize the following {} into clear, actionable bullet points:\n\n{}\n\nProvide a concise summary with key points:",
        content_type, req.content,
    )
}

/// Build the assertion generation prompt.
pub fn assertions(req: &GenerateAssertionsRequest) -> String {
    format!(
        "{}\n\nRequest: {} {}\nResponse Status: {}\nResponse Body: {}\n\nGenerate assertions as a JSON array of strings:",
        ASSERTIONS_SYSTEM,
        req.request.method,
        req.request.url,
        req.response.status,
        req.response.body,
    )
}

/// Build the text elaboration prompt.
pub fn elaborate(req: &ElaborateRequest) -> String {
    format!(
        "{}\n\nContext: {}\nField: {}\nOriginal text: {}\n\nElaborated version:",
        ELABORATE_SYSTEM, req.context, req.field, req.text,
    )
}

/// Build the notes-to-item prompt.
pub fn from_notes(req: &GenerateFromNotesRequest) -> String {
    format!(
        "{}\n\nType: {}\nNotes:\n{}\n\nGenerate the structured {} as JSON:",
        FROM_NOTES_SYSTEM, req.item_type, req.notes, req.item_type,
    )
}
