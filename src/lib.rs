pub mod access;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod session;

pub use app::{router, AppState};
