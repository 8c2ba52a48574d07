//! # Connector Layer
//!
//! External integrations implementing the application seams:
//! - Text generation (Gemini over HTTP, mock for tests and demos)
//! - Startup configuration from the environment
//! - The terminal front-end

pub mod adapter;
pub mod config;
pub mod tui;

pub use adapter::*;
pub use config::*;
