use super::*;

/// Tests that only the requesting user's favorites within the given ids are reported.
///
/// Expected: Ok with the intersection
#[tokio::test]
async fn intersects_with_user_favorites() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let (_, _, chapter, first) = factory::helpers::create_episode_with_dependencies(db).await?;
    let second = factory::create_episode(db, chapter.id).await?;
    let third = factory::create_episode(db, chapter.id).await?;

    factory::create_favorite(db, user.id, first.id).await?;
    factory::create_favorite(db, user.id, third.id).await?;
    factory::create_favorite(db, other.id, second.id).await?;

    let favorited = FavoriteRepository::new(db)
        .get_favorited_among(user.id, &[first.id, second.id])
        .await?;

    assert_eq!(favorited.len(), 1);
    assert!(favorited.contains(&first.id));

    Ok(())
}

#[tokio::test]
async fn empty_ids_short_circuit() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let favorited = FavoriteRepository::new(db)
        .get_favorited_among(1, &[])
        .await?;

    assert!(favorited.is_empty());

    Ok(())
}
