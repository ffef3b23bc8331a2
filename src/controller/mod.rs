//! HTTP request handlers for the operator API and dashboard pages.

pub mod auth;
pub mod dashboard;
pub mod signup;
