//! Domain model shared by every mixdesk crate.
//!
//! Holds the order status workflow, role names, service pricing, the file
//! upload policy, and the core error taxonomy. No I/O here.

pub mod error;
pub mod files;
pub mod roles;
pub mod services;
pub mod status;
pub mod types;
pub mod uploads;
