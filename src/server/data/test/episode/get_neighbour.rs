use super::*;

/// Tests walking a chapter in both directions.
///
/// Episodes in another chapter are never returned as neighbours.
///
/// Expected: Ok(Some) inside the chapter, Ok(None) at either end
#[tokio::test]
async fn walks_within_chapter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, book, chapter, first) = factory::helpers::create_episode_with_dependencies(db).await?;
    let other_chapter = factory::create_chapter(db, book.id).await?;
    factory::create_episode(db, other_chapter.id).await?;
    let second = factory::create_episode(db, chapter.id).await?;

    let repo = EpisodeRepository::new(db);
    let first = Episode::from_entity(first);
    let second = Episode::from_entity(second);

    let next = repo.get_neighbour(&first, Neighbour::Next).await?;
    assert_eq!(next.map(|e| e.id), Some(second.id));

    let previous = repo.get_neighbour(&second, Neighbour::Previous).await?;
    assert_eq!(previous.map(|e| e.id), Some(first.id));

    assert!(repo.get_neighbour(&first, Neighbour::Previous).await?.is_none());
    assert!(repo.get_neighbour(&second, Neighbour::Next).await?.is_none());

    Ok(())
}
