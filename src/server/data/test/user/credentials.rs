use super::*;

use chrono::{Duration, Utc};

/// Expected: Ok with the code and expiry stored, then cleared by a password change
#[tokio::test]
async fn password_change_clears_reset_code() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.set_reset_token(user.id, "12345".to_string(), Utc::now() + Duration::minutes(5))
        .await?;

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.reset_token.as_deref(), Some("12345"));
    assert!(stored.reset_token_expires_at.is_some());

    repo.set_password(user.id, "new-hash".to_string()).await?;

    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(stored.password, "new-hash");
    assert!(stored.reset_token.is_none());
    assert!(stored.reset_token_expires_at.is_none());

    Ok(())
}

#[tokio::test]
async fn stores_and_clears_refresh_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.set_refresh_token(user.id, Some("hash".to_string())).await?;
    let stored = repo.find_by_email(&user.email).await?.unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some("hash"));

    repo.set_refresh_token(user.id, None).await?;
    let stored = repo.find_by_id(user.id).await?.unwrap();
    assert!(stored.refresh_token.is_none());

    Ok(())
}
