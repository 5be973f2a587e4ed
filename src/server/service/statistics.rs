use sea_orm::DatabaseConnection;

use crate::server::{data::statistics::StatisticsRepository, error::AppError, model::statistics::Counts};

pub struct StatisticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatisticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets row counts for users and each content level.
    pub async fn counts(&self) -> Result<Counts, AppError> {
        Ok(StatisticsRepository::new(self.db).counts().await?)
    }
}
