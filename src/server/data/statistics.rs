use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};

use crate::server::model::statistics::Counts;

pub struct StatisticsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatisticsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts the rows of every top-level table.
    pub async fn counts(&self) -> Result<Counts, DbErr> {
        Ok(Counts {
            users: entity::prelude::User::find().count(self.db).await?,
            categories: entity::prelude::Category::find().count(self.db).await?,
            books: entity::prelude::Book::find().count(self.db).await?,
            chapters: entity::prelude::Chapter::find().count(self.db).await?,
            episodes: entity::prelude::Episode::find().count(self.db).await?,
        })
    }
}
