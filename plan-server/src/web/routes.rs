//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::planner::PlanError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/planner/lazy_jack/", post(lazy_jack))
        .route("/planner/lazy_jack", post(lazy_jack))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan the quickest trip over the posted schedules.
async fn lazy_jack(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanResponse>, AppError> {
    // Parse JSON manually so rejections carry serde's message
    let req: PlanRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, bytes = body.len(), "unparseable plan request");
        AppError::BadRequest {
            message: format!("Invalid request: {e}"),
        }
    })?;

    let query = req.into_query()?;
    let schedules = query.legs.len();

    let itinerary = state.planner.plan(query).await?;

    info!(
        schedules,
        stops = itinerary.len(),
        "plan request served"
    );

    Ok(Json(PlanResponse::from_itinerary(&itinerary)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Timeout { message: String },
    Internal { message: String },
}

impl From<RequestError> for AppError {
    fn from(e: RequestError) -> Self {
        AppError::BadRequest {
            message: format!("Invalid request: {e}"),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Timeout(_) => AppError::Timeout {
                message: e.to_string(),
            },
            PlanError::TaskFailed(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, CachedPlanner};
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(CachedPlanner::new(
            &CacheConfig::default(),
            Duration::from_secs(5),
        ))
    }

    async fn call(state: &AppState, body: &str) -> Response {
        match lazy_jack(State(state.clone()), Bytes::from(body.to_string())).await {
            Ok(json) => json.into_response(),
            Err(e) => e.into_response(),
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const TWO_LEG_BODY: &str = r#"{
        "schedules": [
            {"departure": {"city": "Mumbai", "timestamp": 100},
             "arrival": {"city": "Singapore", "timestamp": 200}},
            {"departure": {"city": "Singapore", "timestamp": 250},
             "arrival": {"city": "Sydney", "timestamp": 400}}
        ],
        "trip_plan": {"start_city": "Mumbai", "end_city": "Sydney"},
        "prefered_time": 50
    }"#;

    #[tokio::test]
    async fn health_ok() {
        assert_eq!(health().await, "ok");
    }

    #[test]
    fn router_builds() {
        let _router = create_router(state());
    }

    #[tokio::test]
    async fn plans_two_leg_trip() {
        let response = call(&state(), TWO_LEG_BODY).await;
        assert_eq!(response.status(), StatusCode::OK);

        let plan: PlanResponse = body_json(response).await;
        assert_eq!(
            plan.flight_plan,
            vec![
                StopResult {
                    city: "Mumbai".into(),
                    timestamp: 100
                },
                StopResult {
                    city: "Singapore".into(),
                    timestamp: 250
                },
                StopResult {
                    city: "Sydney".into(),
                    timestamp: 400
                },
            ]
        );
    }

    #[tokio::test]
    async fn repeated_request_served_from_cache() {
        let state = state();

        let first: PlanResponse = body_json(call(&state, TWO_LEG_BODY).await).await;
        let second: PlanResponse = body_json(call(&state, TWO_LEG_BODY).await).await;
        assert_eq!(first, second);

        state.planner.cache().sync().await;
        assert_eq!(state.planner.cache().entry_count(), 1);
    }

    #[tokio::test]
    async fn no_route_is_empty_success() {
        let body = r#"{
            "schedules": [
                {"departure": {"city": "Mumbai", "timestamp": 100},
                 "arrival": {"city": "Singapore", "timestamp": 200}}
            ],
            "trip_plan": {"start_city": "Tokyo", "end_city": "Singapore"},
            "prefered_time": 0
        }"#;

        let response = call(&state(), body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let plan: PlanResponse = body_json(response).await;
        assert!(plan.flight_plan.is_empty());
    }

    #[tokio::test]
    async fn invalid_json_rejected() {
        let response = call(&state(), "{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let err: ErrorResponse = body_json(response).await;
        assert!(err.message.starts_with("Invalid request"));
    }

    #[tokio::test]
    async fn missing_field_rejected() {
        let body = r#"{"schedules": [], "trip_plan": {"start_city": "A", "end_city": "B"}}"#;
        let response = call(&state(), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let err: ErrorResponse = body_json(response).await;
        assert!(err.message.contains("prefered_time"));
    }

    #[tokio::test]
    async fn malformed_schedule_rejected() {
        let body = r#"{
            "schedules": [
                {"departure": {"city": "Mumbai", "timestamp": 300},
                 "arrival": {"city": "Singapore", "timestamp": 200}}
            ],
            "trip_plan": {"start_city": "Mumbai", "end_city": "Singapore"},
            "prefered_time": 0
        }"#;

        let response = call(&state(), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let err: ErrorResponse = body_json(response).await;
        assert_eq!(
            err.message,
            "Invalid request: schedule 0: malformed leg: arrival must be after departure"
        );
    }

    #[test]
    fn plan_error_status_codes() {
        let timeout: AppError = PlanError::Timeout(Duration::from_millis(10)).into();
        assert_eq!(
            timeout.into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );

        let failed: AppError = PlanError::TaskFailed("panicked".into()).into();
        assert_eq!(
            failed.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
