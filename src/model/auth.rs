use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
pub struct SignUpDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 100))]
    pub password: String,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct SignInDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Returned by signup and signin.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenPairDto {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 6, max = 20))]
    pub new_password: String,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct ForgotPasswordDto {
    #[validate(email)]
    pub email: String,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct ResetPasswordDto {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 5))]
    pub token: String,
    #[validate(length(min = 6, max = 100))]
    pub new_password: String,
}
