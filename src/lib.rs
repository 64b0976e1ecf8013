pub mod api;
pub mod config;
pub mod error;
pub mod ipc;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod store;
pub mod ws;
