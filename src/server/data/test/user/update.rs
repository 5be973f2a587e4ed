use super::*;

/// Expected: Ok(Some) with the new role and untouched email
#[tokio::test]
async fn promotes_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let updated = UserRepository::new(db)
        .update(UpdateUserParams {
            id: user.id,
            role: Some(Role::Admin),
            ..Default::default()
        })
        .await?
        .unwrap();

    assert_eq!(updated.role, "admin");
    assert_eq!(updated.email, user.email);

    Ok(())
}

#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update(UpdateUserParams {
            id: 3,
            ..Default::default()
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
