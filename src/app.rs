use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/plus", post(handlers::plus))
        .route("/minus", post(handlers::minus))
        .route("/reset", post(handlers::reset))
        .route("/project/name", post(handlers::edit_name))
        .route("/project/link", post(handlers::edit_link))
        .route("/token", post(handlers::set_token))
        .route("/api/state", get(handlers::get_state))
        .route("/api/click", post(handlers::click))
        .with_state(state)
}
