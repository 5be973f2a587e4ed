//! Business logic between controllers and repositories.
//!
//! Services are constructed per request from borrowed state and return domain models.
//! Optional integrations (mail, transcription, Google Play) are passed in as trait objects.

pub mod auth;
pub mod book;
pub mod category;
pub mod chapter;
pub mod episode;
pub mod iap;
pub mod mail;
pub mod statistics;
pub mod transcription;
pub mod user;
