use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
pub struct VerifyAndroidReceiptDto {
    #[validate(length(min = 1))]
    pub purchase_token: String,
    #[validate(length(min = 1))]
    pub package_name: String,
    #[validate(length(min = 1))]
    pub product_id: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct GooglePlayTransactionDto {
    pub id: i32,
    pub user_id: i32,
    pub package_name: String,
    pub product_id: String,
    pub purchase_token: String,
    pub start_time_millis: Option<String>,
    pub expiry_time_millis: Option<String>,
    pub auto_renewing: Option<String>,
    pub price_currency_code: Option<String>,
    pub price_amount_micros: Option<String>,
    pub country_code: Option<String>,
    pub developer_payload: Option<String>,
    pub cancel_reason: Option<String>,
    pub user_cancellation_time_millis: Option<String>,
    pub order_id: Option<String>,
    pub purchase_type: Option<String>,
    pub acknowledgement_state: Option<String>,
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct VerifyReceiptResponseDto {
    pub success: bool,
    pub message: String,
    pub data: GooglePlayTransactionDto,
}
