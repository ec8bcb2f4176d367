//! Action lifecycle and WIP-limited assignment.
//!
//! Team members create actions with due dates, move them between statuses
//! and explain delays. Project managers may additionally assign actions to
//! other team members and see everyone's board. When an owner already holds
//! the configured number of active actions, new ones are routed to backlog.
//!
//! - Domain types in [`domain`]
//! - Payload validation in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services and the request boundary in [`services`]
//! - Tunable limits in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
