//! Frame encoders.

/// Opaque PNG output.
pub mod png;
