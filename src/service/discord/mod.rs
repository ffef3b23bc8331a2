//! Discord messaging integration.

pub mod messenger;
