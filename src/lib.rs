//! Employee Marketplace API Library
//!
//! Listing lifecycle and authorization over a persistent store: sign-up and
//! sign-in restricted to one organizational email domain, listing creation
//! with full payload validation, owner-only status changes, soft deletion,
//! atomic view counting and filtered listing queries.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
