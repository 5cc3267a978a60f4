//! # Core Entities
//!
//! Primitive types shared by every subsystem.

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte hash (e.g., SHA-256).
pub type Hash = [u8; 32];
