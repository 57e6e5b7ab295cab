// Library entry so integration tests can reference internal modules.
// The binary (`main.rs`) wires the same modules to the gateway.
pub mod commands;
pub mod config;
pub mod constants;
pub mod database;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod interactions;
pub mod model;
pub mod services;
pub mod ui;

pub use error::{BotError, BotResult};
pub use model::AppState;
