use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for test contexts backed by an in-memory SQLite database.
///
/// Add entity tables in dependency order, then call `build()`.
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(Category)
///     .with_table(Book)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables with foreign keys must be added after the tables they reference.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the content hierarchy: Category, Book, Chapter and Episode.
    pub fn with_content_tables(self) -> Self {
        self.with_table(Category)
            .with_table(Book)
            .with_table(Chapter)
            .with_table(Episode)
    }

    /// Adds every table in the schema.
    ///
    /// Use this for tests that touch users together with content, such as favorites
    /// or statistics.
    pub fn with_all_tables(self) -> Self {
        self.with_table(User)
            .with_content_tables()
            .with_table(UserFavoriteEpisode)
            .with_table(GooglePlayTransaction)
    }

    /// Opens the database and creates every configured table.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
