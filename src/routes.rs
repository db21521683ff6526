use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde_json::json;
use tracing::info;

use crate::error::{ApiError, SubmitError, ValidationError};
use crate::models::{Summary, SurveySubmission, NO_DATA_MESSAGE};
use crate::state::AppState;
use crate::{stats, validation};

pub const GREETING: &str = "Hello from the Lifestyle Survey App Server!";
pub const SAVED_MESSAGE: &str = "Survey saved successfully!";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/survey", post(submit_handler))
        .route("/api/results", get(results_handler))
        .with_state(state)
}

pub async fn root_handler() -> &'static str {
    GREETING
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SurveySubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(submission) = payload
        .map_err(|rejection| ValidationError::MalformedPayload(rejection.body_text()))
        .map_err(SubmitError::from)?;

    let survey = validation::decode(submission).map_err(SubmitError::from)?;
    if state.strict {
        validation::check_form(&survey, Local::now().date_naive()).map_err(SubmitError::from)?;
    }

    state.store.append(&survey).await.map_err(SubmitError::from)?;
    info!("Survey saved");

    Ok((StatusCode::CREATED, Json(json!({ "message": SAVED_MESSAGE }))))
}

pub async fn results_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let records = state.store.list_all().await?;

    let response = match stats::summarize_now(&records) {
        Summary::NoData => Json(json!({ "message": NO_DATA_MESSAGE })).into_response(),
        Summary::Report(report) => {
            info!(total = report.total_surveys, "Survey results computed");
            Json(report).into_response()
        }
    };

    Ok(response)
}
