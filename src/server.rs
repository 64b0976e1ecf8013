use std::future::Future;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::AppState;
use crate::{api, ipc, ws};

/// Runs every enabled transport until all of them have stopped.
pub async fn run(config: &ServerConfig, state: AppState) {
    info!("HTTP mode: {}", if config.use_http { "enabled" } else { "disabled" });
    info!("WebSocket mode: {}", if config.use_websocket { "enabled" } else { "disabled" });
    info!("Pipe mode: enabled");

    let http_addr = config.http_addr();
    let ws_addr = config.ws_addr();

    let http = async {
        if config.use_http {
            let _ = supervise("HTTP", api::serve(&http_addr, state.clone())).await;
        }
    };
    let websocket = async {
        if config.use_websocket {
            let _ = supervise("WebSocket", ws::serve(&ws_addr, state.clone())).await;
        }
    };
    let pipe = async {
        let _ = supervise("Pipe", ipc::serve(&config.pipe_name, Arc::clone(&state.dispatcher))).await;
    };

    tokio::join!(http, websocket, pipe);
    info!("All transports stopped");
}

/// A failing transport is logged and left down; the others keep serving.
pub async fn supervise<F>(name: &str, transport: F) -> Result<(), AppError>
where
    F: Future<Output = Result<(), AppError>>,
{
    let result = transport.await;
    if let Err(e) = &result {
        error!("{} transport stopped: {}", name, e);
    }
    result
}
