//! Domain models and operation parameters.
//!
//! Models convert from entities at the repository boundary (`from_entity`) and into DTOs at
//! the controller boundary (`into_dto`). Parameter types carry validated input from
//! controllers into services. Each listable resource also declares its
//! `CollectionProperties` here.

pub mod auth;
pub mod book;
pub mod category;
pub mod chapter;
pub mod episode;
pub mod iap;
pub mod statistics;
pub mod user;
