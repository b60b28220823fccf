//! Domain layer - Inventory types and port definitions
//!
//! This module defines the core trait (port) that the vCenter adapter
//! implements, following hexagonal architecture principles.

pub mod ports;

pub use ports::*;
