use super::*;

/// Tests filtering with `$contains` and sorting by name descending.
///
/// Expected: Ok with only matching categories, total reflecting the filter
#[tokio::test]
async fn filters_and_sorts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["World War", "Cold War", "Poetry"] {
        factory::category::CategoryFactory::new(db)
            .name(name)
            .build()
            .await?;
    }

    let query = CollectionQuery {
        filter: Some(r#"{"name":{"$contains":"war"}}"#.to_string()),
        sort: Some("-name".to_string()),
        ..Default::default()
    }
    .parse::<CategoryProperties>()
    .unwrap();

    let collection = CategoryRepository::new(db).get_collection(query).await?;

    let names: Vec<_> = collection.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["World War", "Cold War"]);
    assert_eq!(collection.total, 2);

    Ok(())
}

/// Expected: Ok with the second page holding the remainder
#[tokio::test]
async fn paginates() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_category(db).await?;
    }

    let query = CollectionQuery {
        page: 1,
        limit: 3,
        ..Default::default()
    }
    .parse::<CategoryProperties>()
    .unwrap();

    let collection = CategoryRepository::new(db).get_collection(query).await?;

    assert_eq!(collection.items.len(), 2);
    assert_eq!(collection.total, 5);
    assert_eq!(collection.total_pages(), 2);

    Ok(())
}

/// Tests `$contains` over non-ASCII names, including a renamed category.
///
/// Expected: Ok with matches regardless of letter case
#[tokio::test]
async fn contains_folds_non_ascii_case() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::category::CategoryFactory::new(db)
        .name("ĐẮC NHÂN TÂM")
        .build()
        .await?;
    let renamed = factory::category::CategoryFactory::new(db)
        .name("Poetry")
        .build()
        .await?;
    CategoryRepository::new(db)
        .update(UpdateCategoryParams {
            id: renamed.id,
            name: Some("Đắc Văn".to_string()),
            ..Default::default()
        })
        .await?;

    let query = CollectionQuery {
        filter: Some(r#"{"name":{"$contains":"đắc"}}"#.to_string()),
        sort: Some("id".to_string()),
        ..Default::default()
    }
    .parse::<CategoryProperties>()
    .unwrap();

    let collection = CategoryRepository::new(db).get_collection(query).await?;

    let names: Vec<_> = collection.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ĐẮC NHÂN TÂM", "Đắc Văn"]);

    Ok(())
}
