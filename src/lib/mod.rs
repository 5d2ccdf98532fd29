//! Shared library modules providing error types, shell word checks, and telemetry initialization.

pub mod errors;
pub mod shell;
pub mod telemetry;
