use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::State,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::{
    error::AppError,
    state::State as ServerState,
    user::{SubmissionPayload, SubmissionRecord, SubmissionResponse},
};

pub fn app(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/users", post(users_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn users_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<SubmissionPayload>,
) -> Result<Json<SubmissionResponse>, AppError> {
    if !payload.has_all_fields() {
        return Err(AppError::MissingFields);
    }

    let user: SubmissionRecord = state.store.insert(&payload).await.map_err(|e| {
        error!("Error saving user: {e}");
        AppError::Persistence(e)
    })?;

    Ok(Json(SubmissionResponse {
        success: true,
        user,
    }))
}
