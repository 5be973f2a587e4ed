use super::*;

/// Tests any authenticated user passes when no permission is required.
///
/// Expected: Ok(User)
#[tokio::test]
async fn allows_authenticated_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::create_user(db).await?;
    let pair = tokens.issue_pair(user.id, &user.email)?;
    let headers = headers_with(&format!("Bearer {}", pair.access_token));

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await?;

    assert_eq!(result.id, user.id);

    Ok(())
}

/// Tests admins pass the admin permission check.
///
/// Expected: Ok(User)
#[tokio::test]
async fn allows_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let admin = factory::user::UserFactory::new(db).admin(true).build().await?;
    let pair = tokens.issue_pair(admin.id, &admin.email)?;
    let headers = headers_with(&format!("Bearer {}", pair.access_token));

    let result = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(result.id, admin.id);

    Ok(())
}

/// Tests regular users are denied admin operations.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_non_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::create_user(db).await?;
    let pair = tokens.issue_pair(user.id, &user.email)?;
    let headers = headers_with(&format!("Bearer {}", pair.access_token));

    let result = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == user.id
    ));

    Ok(())
}

/// Tests a request without a token is rejected.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn fails_without_token() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
}

/// Tests a refresh token cannot be used as an access token.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn fails_with_refresh_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::create_user(db).await?;
    let pair = tokens.issue_pair(user.id, &user.email)?;
    let headers = headers_with(&format!("Bearer {}", pair.refresh_token));

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a valid token for a deleted user is rejected.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn fails_for_deleted_user() {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let pair = tokens.issue_pair(4242, "gone@example.com").unwrap();
    let headers = headers_with(&format!("Bearer {}", pair.access_token));

    let result = AuthGuard::new(db, &tokens, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(4242)))
    ));
}
