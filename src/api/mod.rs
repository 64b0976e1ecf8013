use axum::Json;
use axum::response::{IntoResponse, Response};
use axum::{Router, extract::State, routing::get};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppError;
use crate::models::{Envelope, RequestKind};
use crate::state::AppState;

// Every envelope, including failures, goes out as 200.
impl IntoResponse for Envelope<'_> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/timetable", get(timetable))
        .route("/api/current-course", get(current_course))
        .route("/api/weather", get(weather))
        .route("/api/countdown", get(countdown))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: &str, state: AppState) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::bind(addr, e))?;
    let local = listener.local_addr()?;
    info!("HTTP server listening on http://{}", local);
    info!("API endpoints available at http://{}/api", local);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn respond(state: &AppState, kind: RequestKind) -> Response {
    state.dispatcher.dispatch(&kind, None).into_response()
}

async fn timetable(State(state): State<AppState>) -> Response {
    respond(&state, RequestKind::Timetable)
}

async fn current_course(State(state): State<AppState>) -> Response {
    respond(&state, RequestKind::CurrentCourse)
}

async fn weather(State(state): State<AppState>) -> Response {
    respond(&state, RequestKind::Weather)
}

async fn countdown(State(state): State<AppState>) -> Response {
    respond(&state, RequestKind::Countdown)
}
