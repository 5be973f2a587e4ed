use super::*;
use chrono::{Duration, Utc};

/// Tests that a chapter's episodes come back newest first, independent of insert order.
///
/// Expected: Ok with only that chapter's episodes ordered by created_at descending
#[tokio::test]
async fn lists_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, chapter, oldest) = factory::helpers::create_episode_with_dependencies(db).await?;
    let now = Utc::now();
    let newest = factory::episode::EpisodeFactory::new(db, chapter.id)
        .created_at(now + Duration::hours(2))
        .build()
        .await?;
    let middle = factory::episode::EpisodeFactory::new(db, chapter.id)
        .created_at(now + Duration::hours(1))
        .build()
        .await?;
    factory::helpers::create_episode_with_dependencies(db).await?;

    let episodes = EpisodeRepository::new(db).get_by_chapter(chapter.id).await?;

    let ids: Vec<_> = episodes.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);

    Ok(())
}

/// Expected: Ok with the higher id first when timestamps tie
#[tokio::test]
async fn breaks_ties_by_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, chapter, _) = factory::helpers::create_episode_with_dependencies(db).await?;
    let at = Utc::now() + Duration::days(1);
    let first = factory::episode::EpisodeFactory::new(db, chapter.id)
        .created_at(at)
        .build()
        .await?;
    let second = factory::episode::EpisodeFactory::new(db, chapter.id)
        .created_at(at)
        .build()
        .await?;

    let episodes = EpisodeRepository::new(db).get_by_chapter(chapter.id).await?;

    assert_eq!(episodes[0].id, second.id);
    assert_eq!(episodes[1].id, first.id);
    assert_eq!(episodes.len(), 3);

    Ok(())
}

/// Expected: Ok with an empty list
#[tokio::test]
async fn empty_for_unknown_chapter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::helpers::create_episode_with_dependencies(db).await?;

    let episodes = EpisodeRepository::new(db).get_by_chapter(999).await?;

    assert!(episodes.is_empty());

    Ok(())
}
