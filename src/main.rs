use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use time_widgets_server::config::ServerConfig;
use time_widgets_server::server;
use time_widgets_server::services::Dispatcher;
use time_widgets_server::state::AppState;
use time_widgets_server::store::DataStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "time_widgets_server=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::new_from_env()?;

    let store = match &config.data_file {
        Some(path) => DataStore::from_json_file(path)?,
        None => DataStore::default(),
    };
    let state = AppState::new(Dispatcher::new(Arc::new(store)));

    info!("Server starting");
    server::run(&config, state).await;
    Ok(())
}
