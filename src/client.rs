//! The remote analysis gateway.
//!
//! `AnalysisGateway` is a thin blocking HTTP client over the four backend
//! endpoints: analyze, suggest, eisenhower, and dependency-graph. It
//! forwards the full task store where the endpoint expects one and maps
//! responses into typed results. Failure policy lives with the caller
//! ([`Dashboard`](crate::app::Dashboard)): analyze/suggest surface errors,
//! eisenhower and dependency-graph fall back to local computation.
//!
//! Deliberately no timeout, cancellation, or retry: a request blocks its
//! caller until the transport gives up.

use chrono::NaiveDate;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::classify::EisenhowerMatrix;
use crate::graph::DependencyGraph;
use crate::task::Task;

/// Default base URL for the analysis service.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

// ---------------------------------------------------------------------------
// Client error
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ClientError {
    #[error("request to {url} failed: {message}")]
    #[diagnostic(
        code(taskdeck::client::transport),
        help("Is the analysis server running? Check the --server address.")
    )]
    Transport { url: String, message: String },

    #[error("analysis server rejected the request ({status}): {message}")]
    #[diagnostic(code(taskdeck::client::api))]
    Api { status: u16, message: String },

    #[error("unexpected response from server: {message}")]
    #[diagnostic(code(taskdeck::client::response), help("Server version mismatch?"))]
    Response { message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

// ---------------------------------------------------------------------------
// Strategy selector
// ---------------------------------------------------------------------------

/// Scoring strategy forwarded verbatim to the analyze endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Strategy {
    /// Balanced urgency/importance/effort weighting.
    #[default]
    SmartBalance,
    /// Favor quick wins.
    FastestWins,
    /// Favor high-importance tasks.
    HighImpact,
    /// Favor close deadlines.
    DeadlineDriven,
}

impl Strategy {
    /// Wire name, as the server expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
            Strategy::DeadlineDriven => "deadline_driven",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// A task augmented with the server's priority score and explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    /// Priority in [0, 1], displayed with three decimals.
    pub priority_score: f64,
    pub explanation: String,
}

/// Result of the analyze endpoint: scored tasks, highest priority first.
#[derive(Debug, Clone, Deserialize)]
pub struct Analysis {
    pub tasks: Vec<ScoredTask>,
    pub strategy_used: String,
}

/// One ranked entry from the suggest endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub rank: usize,
    /// The suggested task's title.
    pub task: String,
    pub priority_score: f64,
    pub reason: String,
    pub due_date: NaiveDate,
    pub estimated_hours: f64,
    pub importance: u8,
}

/// Result of the dependency-graph endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphAnalysis {
    pub graph: DependencyGraph,
    pub has_circular_deps: bool,
}

#[derive(Deserialize)]
struct SuggestResponse {
    suggestions: Vec<Suggestion>,
}

#[derive(Deserialize)]
struct MatrixResponse {
    matrix: EisenhowerMatrix,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

// ---------------------------------------------------------------------------
// AnalysisGateway
// ---------------------------------------------------------------------------

/// Blocking HTTP client for the analysis service.
pub struct AnalysisGateway {
    base_url: String,
    http: ureq::Agent,
}

impl AnalysisGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: ureq::Agent::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Map a ureq failure: non-2xx responses carry `{"error": "..."}` when
    /// the server produced them; anything else is a transport problem.
    fn map_error(url: &str, err: ureq::Error) -> ClientError {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_json::<ErrorBody>()
                    .map(|body| body.error)
                    .unwrap_or_else(|_| format!("server returned status {status}"));
                ClientError::Api { status, message }
            }
            other => ClientError::Transport {
                url: url.to_string(),
                message: other.to_string(),
            },
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let resp = self
            .http
            .get(&url)
            .call()
            .map_err(|e| Self::map_error(&url, e))?;
        resp.into_json().map_err(|e| ClientError::Response {
            message: format!("failed to parse JSON: {e}"),
        })
    }

    fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .send_json(body)
            .map_err(|e| Self::map_error(&url, e))?;
        resp.into_json().map_err(|e| ClientError::Response {
            message: format!("failed to parse JSON: {e}"),
        })
    }

    /// Score and rank the store with the given strategy.
    ///
    /// The body is exactly the JSON array of tasks; the strategy rides as
    /// a query parameter so the body shape stays a plain list.
    pub fn analyze(&self, tasks: &[Task], strategy: Strategy) -> ClientResult<Analysis> {
        self.post_json(
            &format!("/api/tasks/analyze/?strategy={}", strategy.as_str()),
            &tasks,
        )
    }

    /// Fetch today's ranked task suggestions.
    pub fn suggest(&self) -> ClientResult<Vec<Suggestion>> {
        let resp: SuggestResponse = self.get_json("/api/tasks/suggest/")?;
        Ok(resp.suggestions)
    }

    /// Fetch the server-computed Eisenhower matrix.
    pub fn eisenhower(&self) -> ClientResult<EisenhowerMatrix> {
        let resp: MatrixResponse = self.get_json("/api/tasks/eisenhower/")?;
        Ok(resp.matrix)
    }

    /// Build the dependency graph server-side, including cycle detection.
    pub fn dependency_graph(&self, tasks: &[Task]) -> ClientResult<GraphAnalysis> {
        self.post_json("/api/tasks/dependency-graph/", &tasks)
    }
}
