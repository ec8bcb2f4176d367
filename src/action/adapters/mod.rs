//! Adapter implementations for action ports.

pub mod memory;
pub mod postgres;
