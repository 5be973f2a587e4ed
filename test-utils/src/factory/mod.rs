//! Factories for inserting test rows with sensible defaults.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` shorthand.
//!
//! ```rust,ignore
//! let category = factory::create_category(db).await?;
//! let book = factory::book::BookFactory::new(db, category.id)
//!     .name("Dune")
//!     .top(true)
//!     .build()
//!     .await?;
//!
//! let (category, book, chapter, episode) =
//!     factory::helpers::create_episode_with_dependencies(db).await?;
//! ```

pub mod book;
pub mod category;
pub mod chapter;
pub mod episode;
pub mod favorite;
pub mod helpers;
pub mod user;

pub use book::create_book;
pub use category::create_category;
pub use chapter::create_chapter;
pub use episode::create_episode;
pub use favorite::create_favorite;
pub use user::create_user;
