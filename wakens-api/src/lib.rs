use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod bookings;
pub mod catalog;
pub mod error;
pub mod sensors;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .merge(sensors::routes())
        .merge(bookings::routes())
        .merge(admin::routes())
        .merge(catalog::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
