//! Tasklist server - REST service for a minimal to-do list.
//!
//! This crate provides the task domain model, the storage layer behind the
//! [`store::TaskStore`] trait, the axum HTTP API, and the infrastructure
//! (configuration, telemetry, audit logging) used by the binary.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// HTTP handlers and routes.
pub mod api;
/// Task entity and validated inputs.
pub mod domain;
/// Infrastructure components (config, server, telemetry).
pub mod infrastructure;
/// Request-handling state.
pub mod state;
/// Task persistence.
pub mod store;
