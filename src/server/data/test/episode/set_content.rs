use super::*;

#[tokio::test]
async fn stores_transcript() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, episode) = factory::helpers::create_episode_with_dependencies(db).await?;

    let updated = EpisodeRepository::new(db)
        .set_content(episode.id, "Once upon a time".to_string())
        .await?
        .unwrap();

    assert_eq!(updated.content.as_deref(), Some("Once upon a time"));

    Ok(())
}

#[tokio::test]
async fn returns_none_for_missing_episode() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = EpisodeRepository::new(db)
        .set_content(404, String::new())
        .await?;

    assert!(result.is_none());

    Ok(())
}
