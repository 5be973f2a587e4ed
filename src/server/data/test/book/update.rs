use super::*;

/// Expected: Ok(Some) with the new name and a later `updated_at`
#[tokio::test]
async fn updates_name_and_bumps_timestamp() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let book = factory::create_book(db, category.id).await?;

    let updated = BookRepository::new(db)
        .update(UpdateBookParams {
            id: book.id,
            name: Some("Children of Dune".to_string()),
            ..Default::default()
        })
        .await?
        .unwrap();

    assert_eq!(updated.name, "Children of Dune");
    assert_eq!(updated.author, book.author);
    assert!(updated.updated_at >= book.updated_at);

    Ok(())
}
