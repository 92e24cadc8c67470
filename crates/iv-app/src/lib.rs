//! Shared application service layer for irvault.
//!
//! This crate sits between the repository engine and whatever frontend
//! drives the device (the network control layer, the maintenance CLI),
//! centralizing the learn / control / list / delete operations, the
//! transceiver seam, and device configuration.

pub mod config;
pub mod device;
pub mod error;
pub mod service;

// Re-export key types for convenience
pub use config::{load_config, validate_config, DeviceConfig};
pub use device::{DriverError, IrTransceiver};
pub use error::{AppError, AppResult};
pub use service::{ControlReport, LearnReport, SignalService, StoredSignal};
