//! `MiseKai`: team action tracking.
//!
//! This crate provides the business rules behind the `MiseKai` action board:
//! creating and updating actions, WIP-limited assignment, delay reasons,
//! due-date history, and filtered, paginated listings.
//!
//! # Architecture
//!
//! `MiseKai` follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage, identity and caching
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, in-memory)
//!
//! # Modules
//!
//! - [`action`]: Action lifecycle, validation and listing

pub mod action;
