//! Database repository layer.
//!
//! Each repository borrows the connection and performs the queries for one table (or one
//! relationship). Repositories return domain models, except `UserRepository`, which returns
//! entity models so that the auth service can read credential columns.

pub mod book;
pub mod category;
pub mod chapter;
pub mod episode;
pub mod favorite;
pub mod google_play_transaction;
pub mod statistics;
pub mod user;

/// Outcome of flipping a flag whose `true` count is capped.
#[derive(Debug)]
pub enum TopToggle<T> {
    Toggled(T),
    CapReached,
    Missing,
}

#[cfg(test)]
mod test;
