//! Application state shared across all request handlers.
//!
//! Initialized once during startup and cloned for each request handler through
//! Axum's state extraction. All fields are cheap to clone: the coordinator is
//! reference-counted and the session service shares its token set internally.

use std::sync::Arc;

use crate::service::admin::session::AdminSessionService;
use crate::service::signup::coordinator::SignupCoordinator;

/// Shared application state for the operator API.
#[derive(Clone)]
pub struct AppState {
    /// Signup orchestration core, shared with the Discord event handler.
    pub coordinator: Arc<SignupCoordinator>,

    /// Operator dashboard session service.
    pub admin_sessions: AdminSessionService,
}

impl AppState {
    pub fn new(coordinator: Arc<SignupCoordinator>, admin_sessions: AdminSessionService) -> Self {
        Self {
            coordinator,
            admin_sessions,
        }
    }
}
