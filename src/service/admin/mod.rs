//! Operator dashboard services.

pub mod session;
