//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use chrono::Local;
use tower_http::services::ServeDir;

use crate::domain::ParamsError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(itinerary_page))
        .route("/trips", get(trip_list))
        .route("/params", post(submit_params))
        .route("/retry", post(retry))
        .route("/health", get(health))
        .route("/api/state", get(api_state))
        .route("/api/params", post(api_params))
        .route("/api/stations", get(api_stations))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The itinerary page.
async fn itinerary_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut session = state.session.lock().await;
    session.sync();

    let template = ItineraryTemplate::from_session(&*session, &Local);
    render(&template)
}

/// Just the trip list fragment.
async fn trip_list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut session = state.session.lock().await;
    session.sync();

    let template = TripListTemplate {
        status: StatusView::from_state(session.state(), &Local),
    };
    render(&template)
}

/// Apply the page's control form, then go back to the page.
async fn submit_params(
    State(state): State<AppState>,
    Form(form): Form<ParamsForm>,
) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    session.sync();

    let changed = session.submit(form.to_params())?;
    tracing::debug!(changed, params = ?session.params(), "params form submitted");
    Ok(Redirect::to("/"))
}

/// Re-run the current query, then go back to the page.
async fn retry(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    session.sync();

    let token = session.retry()?;
    tracing::info!(%token, "retry requested");
    Ok(Redirect::to("/"))
}

/// JSON snapshot of the session.
async fn api_state(State(state): State<AppState>) -> Json<StateResponse> {
    let mut session = state.session.lock().await;
    session.sync();

    Json(StateResponse::from_session(&*session, &Local))
}

/// Change the parameters from a JSON client. Answers with the new snapshot.
async fn api_params(
    State(state): State<AppState>,
    Json(req): Json<ParamsRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.sync();

    session.submit(req.to_params())?;
    Ok(Json(StateResponse::from_session(&*session, &Local)))
}

/// The station directory.
async fn api_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let session = state.session.lock().await;
    Json(StationsResponse::from_directory(session.directory()))
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<ParamsError> for AppError {
    fn from(e: ParamsError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, "{message}");
        } else {
            tracing::warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
