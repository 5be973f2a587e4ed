use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};
use test_utils::{builder::TestBuilder, factory};

use super::*;
use crate::model::auth::ForgotPasswordDto;

/// Records every code it is asked to deliver.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_reset_code(&self, email: &str, _name: &str, code: &str) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

fn tokens() -> TokenService {
    TokenService::new("access", Duration::minutes(15), "refresh", Duration::days(7))
}

fn sign_up_dto(email: &str) -> SignUpDto {
    SignUpDto {
        name: "Reader".to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        date_of_birth: None,
        gender: None,
        address: None,
        phone_number: None,
    }
}

async fn setup() -> test_utils::context::TestContext {
    TestBuilder::new().with_all_tables().build().await.unwrap()
}

async fn stored_user(db: &DatabaseConnection, id: i32) -> entity::user::Model {
    UserRepository::new(db).find_by_id(id).await.unwrap().unwrap()
}

/// Tests signing up stores a hashed password and refresh token.
#[tokio::test]
async fn sign_up_hashes_secrets() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let session = AuthService::new(db, &tokens)
        .sign_up(sign_up_dto("reader@example.com"))
        .await
        .unwrap();

    let user = stored_user(db, session.user_id).await;
    assert_eq!(user.role, "user");
    assert_ne!(user.password, "password123");
    assert!(verify_secret("password123", &user.password).unwrap());

    let stored = user.refresh_token.unwrap();
    assert!(verify_secret(&session.tokens.refresh_token, &stored).unwrap());
}

/// Tests a second signup with the same email is rejected.
#[tokio::test]
async fn sign_up_rejects_duplicate_email() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let service = AuthService::new(db, &tokens);

    service.sign_up(sign_up_dto("dup@example.com")).await.unwrap();
    let result = service.sign_up(sign_up_dto("dup@example.com")).await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::UserExists))));
}

/// Tests signin distinguishes unknown email from a wrong password.
#[tokio::test]
async fn sign_in_checks_credentials() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let service = AuthService::new(db, &tokens);

    service.sign_up(sign_up_dto("in@example.com")).await.unwrap();

    let unknown = service
        .sign_in(SignInDto {
            email: "nobody@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await;
    assert!(matches!(
        unknown,
        Err(AppError::AuthErr(AuthError::UserDoesNotExist))
    ));

    let wrong = service
        .sign_in(SignInDto {
            email: "in@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await;
    assert!(matches!(
        wrong,
        Err(AppError::AuthErr(AuthError::IncorrectPassword))
    ));

    let session = service
        .sign_in(SignInDto {
            email: "in@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.email, "in@example.com");
}

/// Tests refresh tokens stop working after logout.
#[tokio::test]
async fn logout_revokes_refresh_token() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let service = AuthService::new(db, &tokens);

    let session = service.sign_up(sign_up_dto("out@example.com")).await.unwrap();

    let rotated = service.refresh(&session.tokens.refresh_token).await.unwrap();
    assert!(tokens.verify_access(&rotated.access_token).is_ok());

    service.logout(session.user_id).await.unwrap();

    let result = service.refresh(&rotated.refresh_token).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::RefreshTokenRevoked(_)))
    ));
}

/// Tests an access token is not accepted as a refresh token.
#[tokio::test]
async fn refresh_rejects_access_token() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let service = AuthService::new(db, &tokens);

    let session = service.sign_up(sign_up_dto("mix@example.com")).await.unwrap();

    let result = service.refresh(&session.tokens.access_token).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));
}

/// Tests the profile lists favorite episode ids.
#[tokio::test]
async fn profile_includes_favorites() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::create_user(db).await.unwrap();
    let (_, _, _, episode) = factory::helpers::create_episode_with_dependencies(db)
        .await
        .unwrap();
    factory::create_favorite(db, user.id, episode.id).await.unwrap();

    let profile = AuthService::new(db, &tokens).profile(user.id).await.unwrap();

    assert_eq!(profile.user.id, user.id);
    assert_eq!(profile.favorite_episode_ids, vec![episode.id]);
}

/// Tests the current password must match before it is replaced.
#[tokio::test]
async fn change_password_requires_current_password() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let service = AuthService::new(db, &tokens);

    let session = service.sign_up(sign_up_dto("cp@example.com")).await.unwrap();

    let wrong = service
        .change_password(
            session.user_id,
            ChangePasswordDto {
                current_password: "nope".to_string(),
                new_password: "newpass".to_string(),
            },
        )
        .await;
    assert!(matches!(
        wrong,
        Err(AppError::AuthErr(AuthError::IncorrectCurrentPassword))
    ));

    service
        .change_password(
            session.user_id,
            ChangePasswordDto {
                current_password: "password123".to_string(),
                new_password: "newpass".to_string(),
            },
        )
        .await
        .unwrap();

    let user = stored_user(db, session.user_id).await;
    assert!(verify_secret("newpass", &user.password).unwrap());
}

/// Tests the forgot/reset flow consumes the mailed code.
#[tokio::test]
async fn reset_password_with_mailed_code() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let service = AuthService::new(db, &tokens);
    let mailer = RecordingMailer::default();

    let session = service.sign_up(sign_up_dto("reset@example.com")).await.unwrap();

    let dto = ForgotPasswordDto {
        email: "reset@example.com".to_string(),
    };
    service.forgot_password(&dto.email, &mailer).await.unwrap();

    let (email, code) = mailer.sent.lock().unwrap()[0].clone();
    assert_eq!(email, "reset@example.com");
    assert_eq!(code.len(), 5);

    let wrong_code = if code == "00000" { "11111" } else { "00000" };
    let result = service
        .reset_password(ResetPasswordDto {
            email: email.clone(),
            token: wrong_code.to_string(),
            new_password: "fresh-pass".to_string(),
        })
        .await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidResetToken))
    ));

    service
        .reset_password(ResetPasswordDto {
            email: email.clone(),
            token: code.clone(),
            new_password: "fresh-pass".to_string(),
        })
        .await
        .unwrap();

    let user = stored_user(db, session.user_id).await;
    assert!(verify_secret("fresh-pass", &user.password).unwrap());
    assert!(user.reset_token.is_none());

    // Code is single-use
    let reuse = service
        .reset_password(ResetPasswordDto {
            email,
            token: code,
            new_password: "again-pass".to_string(),
        })
        .await;
    assert!(reuse.is_err());
}

/// Tests an expired code is rejected even when it matches.
#[tokio::test]
async fn reset_password_rejects_expired_code() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();

    let user = factory::create_user(db).await.unwrap();
    entity::user::ActiveModel {
        id: ActiveValue::Unchanged(user.id),
        reset_token: ActiveValue::Set(Some("12345".to_string())),
        reset_token_expires_at: ActiveValue::Set(Some(Utc::now() - Duration::minutes(1))),
        ..Default::default()
    }
    .update(db)
    .await
    .unwrap();

    let result = AuthService::new(db, &tokens)
        .reset_password(ResetPasswordDto {
            email: user.email,
            token: "12345".to_string(),
            new_password: "fresh-pass".to_string(),
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidResetToken))
    ));
}

/// Tests unknown emails are reported as not found.
#[tokio::test]
async fn forgot_password_unknown_email() {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let tokens = tokens();
    let mailer = RecordingMailer::default();

    let result = AuthService::new(db, &tokens)
        .forgot_password("ghost@example.com", &mailer)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(mailer.sent.lock().unwrap().is_empty());
}
