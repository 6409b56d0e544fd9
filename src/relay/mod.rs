//! Relay client
//!
//! Turns a caller's intent ("generate a script", "run a health check") into
//! a resilient HTTP interaction with the backend: bounded retry with
//! exponential backoff for unary calls, and an incremental, cancellable
//! fragment stream for streamed generation.

pub mod error;
pub mod executor;
pub mod registry;
pub mod stream;
pub mod transport;

use std::sync::Arc;

use futures::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

pub use error::{RelayError, RelayResult};
pub use executor::RequestExecutor;
pub use registry::RelayRegistry;
pub use stream::StreamFragment;
pub use transport::{HttpTransport, RequestDescriptor, RetryPolicy, Transport};

/// Fresh request id for a streaming call.
///
/// Ids only need to be unique among a client's concurrently open streams;
/// a UUID satisfies that without coordination.
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

use crate::models::{
    ApiCollection, AuditReport, AuditRequest, Bug, ElaborateRequest, ElaborateResponse,
    GenerateAssertionsRequest, GenerateAssertionsResponse, GenerateFromNotesRequest,
    GenerateFromNotesResponse, GenerateScriptRequest, GenerateTestCasesRequest,
    GenerateTestCasesResponse, HealthResponse, ProxyExecuteRequest, ProxyExecuteResponse,
    SaveApiCollectionsRequest, SaveBugsRequest, SaveResponse, SaveTestCasesRequest,
    SaveTestPlansRequest, SaveUserStoriesRequest, SummarizeRequest, SummarizeResponse, TestCase,
    TestPlan, UserStory,
};

/// Typed client for the QA Studio backend.
///
/// One instance per session. The registry of in-flight streams lives inside
/// the client, never in global state, so independent clients (and tests)
/// cannot interfere with each other.
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
    executor: RequestExecutor<HttpTransport>,
    registry: Arc<RelayRegistry>,
    retry: RetryPolicy,
}

impl RelayClient {
    /// Create a client rooted at the backend base path, e.g.
    /// `http://localhost:3001/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            executor: RequestExecutor::new(HttpTransport::new(client.clone(), base_url.clone())),
            http: client,
            base_url,
            registry: Arc::new(RelayRegistry::new()),
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry policy applied to unary requests.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The registry of in-flight streams.
    pub fn registry(&self) -> &RelayRegistry {
        &self.registry
    }

    /// Cancel an in-flight stream. No-op for unknown or finished ids; the
    /// consumer's iteration ends without an error fragment.
    pub fn stop_stream(&self, request_id: &str) {
        self.registry.cancel(request_id);
    }

    async fn request<R: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> RelayResult<R> {
        let value = self.executor.execute(&descriptor).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> RelayResult<R> {
        self.request(RequestDescriptor::get(path).with_retry(self.retry))
            .await
    }

    async fn post<T: Serialize, R: DeserializeOwned>(&self, path: &str, body: &T) -> RelayResult<R> {
        let body = serde_json::to_value(body)?;
        self.request(RequestDescriptor::post(path, body).with_retry(self.retry))
            .await
    }

    /// Open a streaming POST and return its fragment stream.
    ///
    /// The request id is registered before the network call; it is released
    /// on completion, error, and cancellation. Reusing an id while its
    /// stream is still open is a caller error.
    #[instrument(skip(self, body), fields(endpoint = %endpoint, request_id = %request_id))]
    pub async fn stream_request(
        &self,
        endpoint: &str,
        body: serde_json::Value,
        request_id: &str,
    ) -> RelayResult<impl Stream<Item = StreamFragment> + Send> {
        let registration = self.registry.begin(request_id)?;

        let url = format!("{}{}", self.base_url, endpoint);
        let response = match self.http.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                self.registry.end(request_id);
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            self.registry.end(request_id);
            return Err(transport::translate_failure(response).await);
        }

        Ok(stream::read_fragments(
            response,
            registration,
            self.registry.clone(),
            request_id.to_string(),
        ))
    }

    // ========================================================================
    // Typed endpoint surface
    // ========================================================================

    pub async fn health_check(&self) -> RelayResult<HealthResponse> {
        self.get("/health").await
    }

    pub async fn generate_test_cases(
        &self,
        input: &GenerateTestCasesRequest,
    ) -> RelayResult<GenerateTestCasesResponse> {
        self.post("/ai/generate-testcases", input).await
    }

    /// Stream script generation as text fragments.
    pub async fn stream_generate_script(
        &self,
        input: &GenerateScriptRequest,
        request_id: &str,
    ) -> RelayResult<impl Stream<Item = StreamFragment> + Send> {
        let body = serde_json::to_value(input)?;
        self.stream_request("/ai/generate-script", body, request_id)
            .await
    }

    pub async fn audit_accessibility(&self, input: &AuditRequest) -> RelayResult<AuditReport> {
        self.post("/ai/audit-accessibility", input).await
    }

    pub async fn summarize(&self, input: &SummarizeRequest) -> RelayResult<SummarizeResponse> {
        self.post("/ai/summarize", input).await
    }

    pub async fn generate_assertions(
        &self,
        input: &GenerateAssertionsRequest,
    ) -> RelayResult<GenerateAssertionsResponse> {
        self.post("/ai/generate-assertions", input).await
    }

    pub async fn elaborate_text(&self, input: &ElaborateRequest) -> RelayResult<ElaborateResponse> {
        self.post("/ai/elaborate", input).await
    }

    pub async fn generate_from_notes(
        &self,
        input: &GenerateFromNotesRequest,
    ) -> RelayResult<GenerateFromNotesResponse> {
        self.post("/ai/generate-from-notes", input).await
    }

    pub async fn execute_api_request(
        &self,
        request: &ProxyExecuteRequest,
    ) -> RelayResult<ProxyExecuteResponse> {
        self.post("/proxy/execute", request).await
    }

    // Artifact persistence

    pub async fn save_test_cases(&self, test_cases: Vec<TestCase>) -> RelayResult<SaveResponse> {
        self.post("/data/test-cases", &SaveTestCasesRequest { test_cases })
            .await
    }

    pub async fn get_test_cases(&self) -> RelayResult<Vec<TestCase>> {
        self.get("/data/test-cases").await
    }

    pub async fn save_user_stories(&self, stories: Vec<UserStory>) -> RelayResult<SaveResponse> {
        self.post("/data/user-stories", &SaveUserStoriesRequest { stories })
            .await
    }

    pub async fn get_user_stories(&self) -> RelayResult<Vec<UserStory>> {
        self.get("/data/user-stories").await
    }

    pub async fn save_bugs(&self, bugs: Vec<Bug>) -> RelayResult<SaveResponse> {
        self.post("/data/bugs", &SaveBugsRequest { bugs }).await
    }

    pub async fn get_bugs(&self) -> RelayResult<Vec<Bug>> {
        self.get("/data/bugs").await
    }

    pub async fn save_test_plans(&self, plans: Vec<TestPlan>) -> RelayResult<SaveResponse> {
        self.post("/data/test-plans", &SaveTestPlansRequest { plans })
            .await
    }

    pub async fn get_test_plans(&self) -> RelayResult<Vec<TestPlan>> {
        self.get("/data/test-plans").await
    }

    pub async fn save_api_collections(
        &self,
        collections: Vec<ApiCollection>,
    ) -> RelayResult<SaveResponse> {
        self.post("/data/api-collections", &SaveApiCollectionsRequest { collections })
            .await
    }

    pub async fn get_api_collections(&self) -> RelayResult<Vec<ApiCollection>> {
        self.get("/data/api-collections").await
    }
}
