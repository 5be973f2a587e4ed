//! SeaORM entity definitions for the podcast content database.

pub mod prelude;
pub mod search;

pub mod book;
pub mod category;
pub mod chapter;
pub mod episode;
pub mod google_play_transaction;
pub mod user;
pub mod user_favorite_episode;
