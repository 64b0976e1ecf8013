use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::{Router, extract::State, routing::get};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::services::Dispatcher;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(upgrade))
        .fallback(upgrade)
        .with_state(state)
}

pub async fn serve(addr: &str, state: AppState) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::bind(addr, e))?;
    info!("WebSocket server listening on ws://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// One inbound message in, one serialised envelope out.
pub fn handle_message(dispatcher: &Dispatcher, message: &[u8]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dispatcher.handle_bytes(message))
}

async fn upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    info!("WebSocket client connected");

    while let Some(message) = socket.recv().await {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                warn!("WebSocket error: {}", e);
                break;
            }
        };

        let reply = match message {
            Message::Text(text) => handle_message(&state.dispatcher, text.as_str().as_bytes()),
            Message::Binary(bytes) => handle_message(&state.dispatcher, &bytes),
            Message::Close(_) => break,
            _ => continue,
        };

        match reply {
            Ok(reply) => {
                debug!("WebSocket response: {}", reply);
                if let Err(e) = socket.send(Message::Text(reply.into())).await {
                    warn!("WebSocket send failed: {}", e);
                    break;
                }
            }
            Err(e) => error!("Failed to serialise WebSocket response: {}", e),
        }
    }

    info!("WebSocket client disconnected");
}
