/// Audit logging for task lifecycle and system events.
pub mod audit;
/// Configuration management for the service.
pub mod config;
/// CORS headers for browser clients.
pub mod cors;
/// HTTP server wiring and lifecycle.
pub mod server;
/// Telemetry setup for logging and tracing.
pub mod telemetry;
