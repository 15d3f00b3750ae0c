//! Handler-level tests for the HTTP API: authentication flow, ingestion
//! status codes, and the 404 semantics of the query endpoints.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use axum::Json;
use tower::ServiceExt;

use larvae_monitor::db::{seed, RepositoryFactory};
use larvae_monitor::http::auth::{AuthUser, SessionUser};
use larvae_monitor::http::dto::{IngestMeasurementRequest, LoginRequest, RegisterRequest};
use larvae_monitor::http::error::AppError;
use larvae_monitor::http::{create_router, handlers, AppState};

fn empty_state() -> AppState {
    AppState::new(RepositoryFactory::create_local())
}

async fn seeded_state() -> AppState {
    let repository = RepositoryFactory::create_local();
    seed::initialize(repository.as_ref()).await.unwrap();
    AppState::new(repository)
}

fn auth_for(state: &AppState, username: &str) -> AuthUser {
    let token = state.sessions.create(1, username);
    AuthUser {
        user: SessionUser {
            user_id: 1,
            username: username.to_string(),
        },
        token,
    }
}

fn ingest_request(tray: i64, weight: f64, count: i64) -> IngestMeasurementRequest {
    IngestMeasurementRequest {
        tray_number: tray,
        length: 15.0,
        width: 3.0,
        area: 45.0,
        weight,
        count,
    }
}

#[tokio::test]
async fn register_then_login_yields_working_token() {
    let state = empty_state();

    let (status, _) = handlers::register(
        State(state.clone()),
        Json(RegisterRequest {
            username: "alice".to_string(),
            password: "secret".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let response = handlers::login(
        State(state.clone()),
        Json(LoginRequest {
            username: "alice".to_string(),
            password: "secret".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(response.status, "success");
    assert!(state.sessions.get(&response.token).is_some());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let state = empty_state();
    let request = RegisterRequest {
        username: "alice".to_string(),
        password: "secret".to_string(),
    };

    handlers::register(State(state.clone()), Json(request.clone()))
        .await
        .unwrap();
    let err = handlers::register(State(state.clone()), Json(request))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let state = seeded_state().await;

    let err = handlers::login(
        State(state.clone()),
        Json(LoginRequest {
            username: "testuser".to_string(),
            password: "wrong".to_string(),
        }),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn logout_invalidates_the_session_token() {
    let state = empty_state();
    let auth = auth_for(&state, "alice");
    let token = auth.token.clone();

    handlers::logout(State(state.clone()), auth).await.unwrap();
    assert!(state.sessions.get(&token).is_none());
}

#[tokio::test]
async fn ingestion_returns_created_with_success_status() {
    let state = empty_state();

    let (status, body) = handlers::ingest_measurement(
        State(state.clone()),
        Json(ingest_request(5, 112.0, 250)),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.status, "success");
    assert!(body.id > 0);
}

#[tokio::test]
async fn ingestion_rejects_negative_count() {
    let state = empty_state();

    let err = handlers::ingest_measurement(
        State(state.clone()),
        Json(ingest_request(5, 112.0, -1)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn tray_query_returns_404_for_unknown_tray() {
    let state = seeded_state().await;
    let auth = auth_for(&state, "testuser");

    let err = handlers::get_tray_data(State(state.clone()), auth, Path(999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn tray_query_returns_dashboard_for_known_tray() {
    let state = seeded_state().await;
    let auth = auth_for(&state, "testuser");

    let view = handlers::get_tray_data(State(state.clone()), auth, Path(1))
        .await
        .unwrap();
    assert!(!view.growth_data.days.is_empty());
    assert_eq!(view.weight_distribution.ranges.len(), 7);
}

#[tokio::test]
async fn combined_query_returns_404_on_empty_store() {
    let state = empty_state();
    let auth = auth_for(&state, "alice");

    let err = handlers::get_combined_tray_data(State(state.clone()), auth)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn comparison_query_on_empty_store_returns_empty_map() {
    let state = empty_state();
    let auth = auth_for(&state, "alice");

    let data = handlers::get_comparison_data(State(state.clone()), auth)
        .await
        .unwrap();
    assert!(data.trays.is_empty());
}

fn get_request(uri: &str, auth_header: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = auth_header {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn router_rejects_request_without_authorization_header() {
    let app = create_router(empty_state());

    let response = app
        .oneshot(get_request("/get_comparison_data", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn router_rejects_non_bearer_authorization_scheme() {
    let app = create_router(empty_state());

    let response = app
        .oneshot(get_request(
            "/get_comparison_data",
            Some("Basic dXNlcjpwYXNz"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn router_rejects_unknown_bearer_token() {
    let app = create_router(empty_state());

    let response = app
        .oneshot(get_request(
            "/get_comparison_data",
            Some("Bearer not-a-session-token"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn router_accepts_valid_bearer_token() {
    let state = empty_state();
    let token = state.sessions.create(1, "alice");
    let app = create_router(state);

    let header = format!("Bearer {}", token);
    let response = app
        .oneshot(get_request("/get_comparison_data", Some(&header)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn router_serves_health_without_authentication() {
    let app = create_router(empty_state());

    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn ingested_measurement_is_visible_to_queries() {
    let state = empty_state();
    handlers::ingest_measurement(State(state.clone()), Json(ingest_request(3, 97.5, 180)))
        .await
        .unwrap();

    let auth = auth_for(&state, "alice");
    let view = handlers::get_tray_data(State(state.clone()), auth, Path(3))
        .await
        .unwrap();
    assert_eq!(view.metrics.weight, 97.5);
    assert_eq!(view.metrics.count, 180);
}
