//! Enviro Dash - Environmental sensor dashboard
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod source;
