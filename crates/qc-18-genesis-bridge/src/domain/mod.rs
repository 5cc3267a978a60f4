//! # Domain Module
//!
//! Core domain types for the Genesis Bridge: the wire payload, the per-channel
//! gate record, the committed rollapp configuration and the rules tying them
//! together.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
