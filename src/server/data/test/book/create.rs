use super::*;

/// Expected: Ok with the book not in the top list and timestamps set
#[tokio::test]
async fn creates_book_in_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;

    let book = BookRepository::new(db)
        .create(CreateBookParams {
            name: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: None,
            url: None,
            is_premium: false,
            category_id: category.id,
        })
        .await?;

    assert_eq!(book.category_id, category.id);
    assert!(!book.is_premium);
    assert!(!book.is_top10_year);
    assert_eq!(book.created_at, book.updated_at);

    Ok(())
}
