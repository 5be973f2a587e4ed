//! Podcast Test Utils
//!
//! Shared helpers for building database-backed tests. A `TestBuilder` configures an in-memory
//! SQLite database with the tables a test needs, and the `factory` module inserts rows with
//! sensible defaults.
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Category;
//!
//! #[tokio::test]
//! async fn lists_categories() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_table(Category).build().await?;
//!     let db = test.db.as_ref().unwrap();
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
