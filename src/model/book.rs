use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: i32,
    pub name: String,
    pub author: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_premium: bool,
    pub is_top10_year: bool,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct CreateBookDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    /// Defaults to `true`.
    pub is_premium: Option<bool>,
    pub category_id: i32,
}

#[derive(Deserialize, ToSchema, Validate, Default)]
pub struct UpdateBookDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub author: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub is_premium: Option<bool>,
    pub category_id: Option<i32>,
}
