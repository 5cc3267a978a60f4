//! # Application Layer
//!
//! Genesis executor and the service wiring gate, validator, executor and
//! acknowledgement builder behind the inbound API.

pub mod executor;
pub mod service;

pub use executor::{GenesisExecutor, GenesisReceipt, GenesisTarget};
pub use service::{GenesisBridgeDependencies, GenesisBridgeService};
