//! Networking types, configuration, middleware, and server lifecycle.

pub mod config;
pub mod middleware;
pub mod module;

pub use config::*;
pub use module::NetworkModule;
