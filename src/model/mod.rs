//! Data transfer objects exchanged over the HTTP API.

pub mod api;
pub mod auth;
pub mod book;
pub mod category;
pub mod chapter;
pub mod episode;
pub mod iap;
pub mod statistics;
pub mod user;
