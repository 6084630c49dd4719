//! Infrastructure layer - External service implementations

pub mod engine;
pub mod logging;
pub mod observability;
