use axum::{
    routing::{get, post},
    Router,
};

use super::handler::{get_test, submit_attempt, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/practice/test", get(get_test))
        .route("/api/practice/attempt", post(submit_attempt))
        .with_state(state)
}
