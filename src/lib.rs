pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod i18n;
pub mod middleware;
pub mod services;
pub mod state;

pub use app::{build_router, build_state, router, run};
pub use state::AppState;
