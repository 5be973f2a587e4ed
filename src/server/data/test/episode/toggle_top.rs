use super::*;
use crate::server::data::TopToggle;

/// Tests that a mark beyond the cap leaves the episode and the top list untouched.
///
/// Expected: CapReached, then Toggled once another episode is unmarked
#[tokio::test]
async fn respects_cap_within_transaction() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, chapter, episode) = factory::helpers::create_episode_with_dependencies(db).await?;
    let mut flagged = Vec::new();
    for _ in 0..2 {
        flagged.push(
            factory::episode::EpisodeFactory::new(db, chapter.id)
                .top(true)
                .build()
                .await?,
        );
    }

    let repo = EpisodeRepository::new(db);

    assert!(matches!(
        repo.toggle_top(episode.id, 2).await?,
        TopToggle::CapReached
    ));
    assert!(!repo.get_by_id(episode.id).await?.unwrap().is_top);
    assert_eq!(repo.get_top().await?.len(), 2);

    assert!(matches!(
        repo.toggle_top(flagged[0].id, 2).await?,
        TopToggle::Toggled(ref e) if !e.is_top
    ));
    let TopToggle::Toggled(marked) = repo.toggle_top(episode.id, 2).await? else {
        panic!("expected the episode to be marked");
    };
    assert!(marked.is_top);

    Ok(())
}

#[tokio::test]
async fn missing_episode() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(matches!(
        EpisodeRepository::new(db).toggle_top(99, 10).await?,
        TopToggle::Missing
    ));

    Ok(())
}
