use super::*;

/// Expected: Ok, marking twice keeps a single favorite
#[tokio::test]
async fn adding_twice_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_, _, _, episode) = factory::helpers::create_episode_with_dependencies(db).await?;

    let repo = FavoriteRepository::new(db);
    repo.add(user.id, episode.id).await?;
    repo.add(user.id, episode.id).await?;

    assert!(repo.is_favorite(user.id, episode.id).await?);
    assert_eq!(repo.get_episode_ids(user.id).await?, vec![episode.id]);

    Ok(())
}

/// Expected: Ok(true) on the first removal, Ok(false) afterwards
#[tokio::test]
async fn removes_favorite() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let (_, _, _, episode) = factory::helpers::create_episode_with_dependencies(db).await?;
    factory::create_favorite(db, user.id, episode.id).await?;

    let repo = FavoriteRepository::new(db);
    assert!(repo.remove(user.id, episode.id).await?);
    assert!(!repo.remove(user.id, episode.id).await?);
    assert!(repo.get_episodes(user.id).await?.is_empty());

    Ok(())
}
