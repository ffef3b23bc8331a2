use axum::{
    routing::{get, post},
    Router,
};

use crate::controller::{auth, dashboard, signup};
use crate::state::AppState;

/// Builds the operator API and dashboard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/controller/login", get(dashboard::login_page))
        .route("/controller/dashboard", get(dashboard::dashboard_page))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route(
            "/api/signups",
            post(signup::create_signup).get(signup::list_signups),
        )
        .route("/api/signups/{message_id}/start", post(signup::mark_started))
        .route(
            "/api/signups/{message_id}/notify",
            post(signup::notify_players),
        )
        .with_state(state)
}
