//! Business logic services.

pub mod admin;
pub mod discord;
pub mod signup;
