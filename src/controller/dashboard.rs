//! Static pages for the operator dashboard.

use axum::response::{Html, Redirect};

/// GET /
pub async fn index() -> Redirect {
    Redirect::to("/controller/login")
}

/// GET /controller/login
pub async fn login_page() -> Html<&'static str> {
    Html(include_str!("../../assets/login.html"))
}

/// GET /controller/dashboard
pub async fn dashboard_page() -> Html<&'static str> {
    Html(include_str!("../../assets/dashboard.html"))
}
