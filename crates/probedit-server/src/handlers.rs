//! HTTP request handlers for the problem resource.
//!
//! `GET /api/problems` reads the latest record, `POST /api/problems` rewrites
//! its editable text. Every other method on the resource is answered with 405.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, on, MethodFilter},
    Router as AxumRouter,
};
use probedit_domain::{Problem, ProblemStore};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

/// Path of the single problem resource
pub const PROBLEMS_PATH: &str = "/api/problems";

/// Methods accepted on the problem resource
pub const ALLOWED_METHODS: &str = "GET, POST";

/// Shared application state
pub struct AppState<S> {
    /// Problem store, one operation per request under the lock
    pub store: Arc<Mutex<S>>,
}

impl<S> AppState<S> {
    /// Wrap a store for sharing across requests
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

/// Save request body
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveProblemRequest {
    /// New editable text
    #[serde(rename = "editableProblem")]
    pub editable_problem: String,
}

/// Save response body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
///
/// Messages are fixed; store details only go to the log.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// Reading the latest problem failed
    FetchFailed,
    /// Writing the editable text failed
    UpdateFailed,
    /// No problem record exists
    NotFound,
    /// Body is not `{ "editableProblem": string }`
    InvalidBody,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::FetchFailed | AppError::UpdateFailed => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidBody => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AppError::FetchFailed => "Failed to fetch problem",
            AppError::UpdateFailed => "Failed to update problem",
            AppError::NotFound => "No problem found",
            AppError::InvalidBody => {
                "Request body must be a JSON object with a string editableProblem field"
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (self.status(), body).into_response()
    }
}

/// GET /api/problems - Latest problem record
async fn get_problem<S>(State(state): State<AppState<S>>) -> Result<Json<Problem>, AppError>
where
    S: ProblemStore,
    S::Error: Display,
{
    let store = state.store.lock().map_err(|_| {
        error!("Problem store lock poisoned");
        AppError::FetchFailed
    })?;

    match store.latest_problem() {
        Ok(Some(problem)) => Ok(Json(problem)),
        Ok(None) => {
            warn!("No problem record to serve");
            Err(AppError::NotFound)
        }
        Err(e) => {
            error!("Failed to fetch problem: {}", e);
            Err(AppError::FetchFailed)
        }
    }
}

/// POST /api/problems - Overwrite the editable text of the latest problem
async fn save_problem<S>(
    State(state): State<AppState<S>>,
    payload: Result<Json<SaveProblemRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError>
where
    S: ProblemStore,
    S::Error: Display,
{
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected save request: {}", rejection.body_text());
        AppError::InvalidBody
    })?;

    let mut store = state.store.lock().map_err(|_| {
        error!("Problem store lock poisoned");
        AppError::UpdateFailed
    })?;

    match store.update_latest_editable(&request.editable_problem) {
        Ok(Some(id)) => {
            debug!("Updated editable text of problem {}", id);
            Ok(Json(MessageResponse {
                message: "Problem updated successfully".to_string(),
            }))
        }
        Ok(None) => {
            warn!("No problem record to update");
            Err(AppError::NotFound)
        }
        Err(e) => {
            error!("Failed to update problem: {}", e);
            Err(AppError::UpdateFailed)
        }
    }
}

/// Any other method on /api/problems
async fn method_not_allowed(method: Method) -> Response {
    let body = if method == Method::HEAD {
        String::new()
    } else {
        format!("Method {} Not Allowed", method)
    };

    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
        body,
    )
        .into_response()
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<S>(state: AppState<S>) -> AxumRouter
where
    S: ProblemStore + Send + 'static,
    S::Error: Display,
{
    AxumRouter::new()
        .route(
            PROBLEMS_PATH,
            get(get_problem::<S>)
                .post(save_problem::<S>)
                // `get` would otherwise answer HEAD too
                .on(MethodFilter::HEAD, method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .with_state(state)
}
