use super::*;

/// Expected: Ok with every field persisted
#[tokio::test]
async fn creates_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);
    let category = repo
        .create(CreateCategoryParams {
            name: "Science Fiction".to_string(),
            description: Some("Space and beyond".to_string()),
            url: None,
        })
        .await?;

    assert_eq!(category.name, "Science Fiction");
    assert_eq!(category.description.as_deref(), Some("Space and beyond"));

    let stored = repo.get_by_id(category.id).await?;
    assert_eq!(stored, Some(category));

    Ok(())
}
