//! HTTP request handlers.
//!
//! Handlers authenticate with `AuthGuard`, validate request DTOs, convert them to parameters,
//! call a service and map the domain result back to a DTO.

pub mod auth;
pub mod book;
pub mod category;
pub mod chapter;
pub mod episode;
pub mod iap;
pub mod statistics;
pub mod user;
