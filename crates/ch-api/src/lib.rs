pub mod config;
pub mod dto;
pub mod error;
pub mod fixtures;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use routes::api_router;
pub use state::AppState;
