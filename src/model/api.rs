use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Page metadata attached to every collection response.
///
/// `next` and `prev` hold neighbouring zero-based page numbers and are omitted at the ends.
#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct PaginationDto {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<u64>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CollectionDto<T> {
    pub data: Vec<T>,
    pub pagination: PaginationDto,
}

/// Option entry for select inputs.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ValueLabelDto {
    pub value: i32,
    pub label: String,
}
