//! Request handlers, one submodule per resource.
//!
//! Handlers delegate persistence to the repositories in `esante_db`, domain
//! rules to `esante_core`, and map errors via [`AppError`](crate::error::AppError).

pub mod accounts;
pub mod auth;
pub mod booklet;
pub mod carnet;
pub mod centers;
pub mod messages;
pub mod mobile;
pub mod mothers;
pub mod qr_cards;
pub mod stats;
