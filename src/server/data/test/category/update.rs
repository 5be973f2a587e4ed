use super::*;

/// Expected: Ok(Some) with only the given fields changed
#[tokio::test]
async fn updates_given_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::category::CategoryFactory::new(db)
        .name("Drama")
        .description("Plays")
        .build()
        .await?;

    let updated = CategoryRepository::new(db)
        .update(UpdateCategoryParams {
            id: existing.id,
            name: Some("Theatre".to_string()),
            ..Default::default()
        })
        .await?
        .unwrap();

    assert_eq!(updated.name, "Theatre");
    assert_eq!(updated.description.as_deref(), Some("Plays"));

    Ok(())
}

/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CategoryRepository::new(db)
        .update(UpdateCategoryParams {
            id: 999,
            ..Default::default()
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
