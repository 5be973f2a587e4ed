use crate::server::{data::statistics::StatisticsRepository, model::statistics::Counts};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

#[tokio::test]
async fn counts_every_table() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    let (_, _, chapter, _) = factory::helpers::create_episode_with_dependencies(db).await?;
    factory::create_episode(db, chapter.id).await?;

    let counts = StatisticsRepository::new(db).counts().await?;

    assert_eq!(
        counts,
        Counts {
            users: 1,
            categories: 1,
            books: 1,
            chapters: 1,
            episodes: 2,
        }
    );

    Ok(())
}
