use super::*;
use crate::server::data::TopToggle;

/// Expected: Toggled both ways with the top list following the flag
#[tokio::test]
async fn toggles_top_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let book = factory::create_book(db, category.id).await?;
    factory::book::BookFactory::new(db, category.id)
        .top(true)
        .build()
        .await?;

    let repo = BookRepository::new(db);

    let TopToggle::Toggled(marked) = repo.toggle_top(book.id, 10).await? else {
        panic!("expected the book to be marked");
    };
    assert!(marked.is_top10_year);

    let top = repo.get_top().await?;
    assert_eq!(top.len(), 2);
    assert_eq!(top.first().map(|b| b.id), Some(book.id));

    let TopToggle::Toggled(unmarked) = repo.toggle_top(book.id, 10).await? else {
        panic!("expected the book to be unmarked");
    };
    assert!(!unmarked.is_top10_year);
    assert_eq!(repo.get_top().await?.len(), 1);

    Ok(())
}

/// Tests that a mark beyond the cap is rolled back while unmarking stays allowed.
///
/// Expected: CapReached with the flag unchanged, then Toggled for an unmark
#[tokio::test]
async fn rolls_back_mark_over_cap() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let flagged = factory::book::BookFactory::new(db, category.id)
        .top(true)
        .build()
        .await?;
    let book = factory::create_book(db, category.id).await?;

    let repo = BookRepository::new(db);

    assert!(matches!(
        repo.toggle_top(book.id, 1).await?,
        TopToggle::CapReached
    ));
    assert!(!repo.get_by_id(book.id).await?.unwrap().is_top10_year);
    assert_eq!(repo.get_top().await?.len(), 1);

    assert!(matches!(
        repo.toggle_top(flagged.id, 1).await?,
        TopToggle::Toggled(_)
    ));

    Ok(())
}

#[tokio::test]
async fn missing_book() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(matches!(
        BookRepository::new(db).toggle_top(7, 10).await?,
        TopToggle::Missing
    ));

    Ok(())
}
