//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `mixdesk_db` and
//! map errors via [`AppError`](crate::error::AppError).

pub mod admin;
pub mod auth;
pub mod freelancers;
pub mod orders;
pub mod revisions;
pub mod uploads;
