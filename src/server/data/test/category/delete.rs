use super::*;

#[tokio::test]
async fn deletes_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;
    let repo = CategoryRepository::new(db);

    assert!(repo.delete(category.id).await?);
    assert!(!repo.exists(category.id).await?);

    Ok(())
}

#[tokio::test]
async fn reports_missing_category() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(!CategoryRepository::new(db).delete(42).await?);

    Ok(())
}
