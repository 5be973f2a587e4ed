use super::*;

fn params() -> EpisodeSearchParams {
    EpisodeSearchParams {
        limit: 10,
        ..Default::default()
    }
}

/// Expected: Ok with case-insensitive substring matches only
#[tokio::test]
async fn matches_title_substring() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, chapter, _) = factory::helpers::create_episode_with_dependencies(db).await?;
    let wanted = factory::episode::EpisodeFactory::new(db, chapter.id)
        .title("The Martian Chronicles")
        .build()
        .await?;

    let result = EpisodeRepository::new(db)
        .search(EpisodeSearchParams {
            title: Some("  martian ".to_string()),
            ..params()
        })
        .await?;

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].id, wanted.id);

    Ok(())
}

/// Tests that hierarchy criteria are combined with OR.
///
/// Expected: Ok with episodes from the chapter and from the other book
#[tokio::test]
async fn unions_hierarchy_criteria() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (category, _, chapter, in_chapter) =
        factory::helpers::create_episode_with_dependencies(db).await?;
    let other_book = factory::create_book(db, category.id).await?;
    let other_chapter = factory::create_chapter(db, other_book.id).await?;
    let in_book = factory::create_episode(db, other_chapter.id).await?;
    factory::helpers::create_episode_with_dependencies(db).await?;

    let result = EpisodeRepository::new(db)
        .search(EpisodeSearchParams {
            chapter_id: Some(chapter.id),
            book_id: Some(other_book.id),
            ..params()
        })
        .await?;

    let mut ids: Vec<_> = result.items.iter().map(|e| e.id).collect();
    ids.sort();
    assert_eq!(ids, vec![in_chapter.id, in_book.id]);

    Ok(())
}

/// Expected: Ok with every episode under the category's books
#[tokio::test]
async fn filters_by_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (category, book, chapter, _) =
        factory::helpers::create_episode_with_dependencies(db).await?;
    factory::create_episode(db, chapter.id).await?;
    let second_chapter = factory::create_chapter(db, book.id).await?;
    factory::create_episode(db, second_chapter.id).await?;
    factory::helpers::create_episode_with_dependencies(db).await?;

    let result = EpisodeRepository::new(db)
        .search(EpisodeSearchParams {
            category_id: Some(category.id),
            ..params()
        })
        .await?;

    assert_eq!(result.total, 3);

    Ok(())
}

/// Expected: Ok with only free top episodes
#[tokio::test]
async fn combines_flags_with_and() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, chapter, _) = factory::helpers::create_episode_with_dependencies(db).await?;
    let wanted = factory::episode::EpisodeFactory::new(db, chapter.id)
        .premium(false)
        .top(true)
        .build()
        .await?;
    factory::episode::EpisodeFactory::new(db, chapter.id)
        .premium(false)
        .build()
        .await?;

    let result = EpisodeRepository::new(db)
        .search(EpisodeSearchParams {
            is_premium: Some(false),
            is_top: Some(true),
            ..params()
        })
        .await?;

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].id, wanted.id);

    Ok(())
}

/// Expected: Ok with the title matched regardless of non-ASCII letter case
#[tokio::test]
async fn matches_non_ascii_title_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, chapter, _) = factory::helpers::create_episode_with_dependencies(db).await?;
    let wanted = factory::episode::EpisodeFactory::new(db, chapter.id)
        .title("ĐẮC NHÂN TÂM")
        .build()
        .await?;

    let result = EpisodeRepository::new(db)
        .search(EpisodeSearchParams {
            title: Some("đắc".to_string()),
            ..params()
        })
        .await?;

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].id, wanted.id);

    Ok(())
}

/// Tests that `%` and `_` in the needle are matched literally.
///
/// Expected: Ok with only the title holding `%`, and no match for `sode_` even though
/// `Episode N` titles would match it as a pattern
#[tokio::test]
async fn treats_wildcards_literally() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, chapter, _) = factory::helpers::create_episode_with_dependencies(db).await?;
    factory::create_episode(db, chapter.id).await?;
    let wanted = factory::episode::EpisodeFactory::new(db, chapter.id)
        .title("50% off_today")
        .build()
        .await?;

    let repo = EpisodeRepository::new(db);
    let percent = repo
        .search(EpisodeSearchParams {
            title: Some("%".to_string()),
            ..params()
        })
        .await?;
    let underscore = repo
        .search(EpisodeSearchParams {
            title: Some("sode_".to_string()),
            ..params()
        })
        .await?;

    assert_eq!(percent.total, 1);
    assert_eq!(percent.items[0].id, wanted.id);
    assert_eq!(underscore.total, 0);

    Ok(())
}
