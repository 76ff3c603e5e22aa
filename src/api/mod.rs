//! E-Kejaksaan Case Tracking API Module
//! REST surface over the deadline engine: classification, dashboard rendering,
//! and cell update checks

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
