use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{AssignmentResult, IngestError, PlanSnapshot, Resource, RunContext, ScheduleRun};

#[derive(Clone)]
pub struct AppState {
    context: Arc<RwLock<RunContext>>,
}

impl AppState {
    pub fn new(context: RunContext) -> Self {
        Self {
            context: Arc::new(RwLock::new(context)),
        }
    }

    fn context(&self) -> Arc<RwLock<RunContext>> {
        self.context.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<IngestError> for ApiError {
    fn from(value: IngestError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RunPayload {
    #[serde(default)]
    reference_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceGenerations {
    pub initial: Vec<Resource>,
    pub scheduled: Option<Vec<Resource>>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/plan", get(get_plan).put(replace_plan))
        .route("/run", post(run_schedule))
        .route("/results", get(get_results))
        .route("/resources", get(get_resources))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, context: RunContext) -> std::io::Result<()> {
    let state = AppState::new(context);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_plan(State(state): State<AppState>) -> Json<PlanSnapshot> {
    let context = state.context();
    let plan = context.read().plan();
    Json(plan)
}

async fn replace_plan(
    State(state): State<AppState>,
    Json(plan): Json<PlanSnapshot>,
) -> Result<Json<PlanSnapshot>, ApiError> {
    let context = state.context();
    let mut guard = context.write();
    guard.replace_plan(plan.resources, plan.work_items)?;
    info!(
        resources = guard.initial_resources().len(),
        work_items = guard.work_items().len(),
        "plan replaced"
    );
    Ok(Json(guard.plan()))
}

/// Body is optional; without a reference date the run starts today.
async fn run_schedule(
    State(state): State<AppState>,
    payload: Option<Json<RunPayload>>,
) -> Json<ScheduleRun> {
    let reference_date = payload
        .and_then(|Json(payload)| payload.reference_date)
        .unwrap_or_else(|| Local::now().date_naive());
    let context = state.context();
    let run = {
        let mut guard = context.write();
        guard.run(reference_date).clone()
    };
    Json(run)
}

async fn get_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<AssignmentResult>>, ApiError> {
    let context = state.context();
    let guard = context.read();
    guard
        .last_run()
        .map(|run| Json(run.results.clone()))
        .ok_or_else(|| ApiError::not_found("no scheduling run yet"))
}

async fn get_resources(State(state): State<AppState>) -> Json<ResourceGenerations> {
    let context = state.context();
    let guard = context.read();
    Json(ResourceGenerations {
        initial: guard.initial_resources().to_vec(),
        scheduled: guard.last_run().map(|run| run.resources.clone()),
    })
}
