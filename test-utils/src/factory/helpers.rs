//! Shared helpers for factories: unique id generation and dependency chains.

use sea_orm::{DatabaseConnection, DbErr};

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a category, book, chapter and episode chained together with default values.
///
/// # Returns
/// - `Ok((category, book, chapter, episode))` - All created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_episode_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::category::Model,
        entity::book::Model,
        entity::chapter::Model,
        entity::episode::Model,
    ),
    DbErr,
> {
    let category = crate::factory::category::create_category(db).await?;
    let book = crate::factory::book::create_book(db, category.id).await?;
    let chapter = crate::factory::chapter::create_chapter(db, book.id).await?;
    let episode = crate::factory::episode::create_episode(db, chapter.id).await?;

    Ok((category, book, chapter, episode))
}
