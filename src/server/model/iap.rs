//! In-app purchase models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::iap::{GooglePlayTransactionDto, VerifyAndroidReceiptDto};

/// `purchases.subscriptions` resource from the Google Play Developer API.
///
/// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.subscriptions
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPurchase {
    pub kind: Option<String>,
    pub start_time_millis: Option<String>,
    pub expiry_time_millis: Option<String>,
    pub auto_renewing: Option<bool>,
    pub price_currency_code: Option<String>,
    pub price_amount_micros: Option<String>,
    pub country_code: Option<String>,
    pub developer_payload: Option<String>,
    pub cancel_reason: Option<i32>,
    pub user_cancellation_time_millis: Option<String>,
    pub order_id: Option<String>,
    pub purchase_type: Option<i32>,
    pub acknowledgement_state: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct VerifyAndroidReceiptParams {
    pub user_id: i32,
    pub purchase_token: String,
    pub package_name: String,
    pub product_id: String,
}

impl VerifyAndroidReceiptParams {
    pub fn from_dto(user_id: i32, dto: VerifyAndroidReceiptDto) -> Self {
        Self {
            user_id,
            purchase_token: dto.purchase_token,
            package_name: dto.package_name,
            product_id: dto.product_id,
        }
    }
}

/// A verified Google Play subscription receipt as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GooglePlayTransaction {
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

impl GooglePlayTransaction {
    pub fn from_entity(entity: entity::google_play_transaction::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            package_name: entity.package_name,
            product_id: entity.product_id,
            purchase_token: entity.purchase_token,
            start_time_millis: entity.start_time_millis,
            expiry_time_millis: entity.expiry_time_millis,
            auto_renewing: entity.auto_renewing,
            price_currency_code: entity.price_currency_code,
            price_amount_micros: entity.price_amount_micros,
            country_code: entity.country_code,
            developer_payload: entity.developer_payload,
            cancel_reason: entity.cancel_reason,
            user_cancellation_time_millis: entity.user_cancellation_time_millis,
            order_id: entity.order_id,
            purchase_type: entity.purchase_type,
            acknowledgement_state: entity.acknowledgement_state,
            kind: entity.kind,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> GooglePlayTransactionDto {
        GooglePlayTransactionDto {
            id: self.id,
            user_id: self.user_id,
            package_name: self.package_name,
            product_id: self.product_id,
            purchase_token: self.purchase_token,
            start_time_millis: self.start_time_millis,
            expiry_time_millis: self.expiry_time_millis,
            auto_renewing: self.auto_renewing,
            price_currency_code: self.price_currency_code,
            price_amount_micros: self.price_amount_micros,
            country_code: self.country_code,
            developer_payload: self.developer_payload,
            cancel_reason: self.cancel_reason,
            user_cancellation_time_millis: self.user_cancellation_time_millis,
            order_id: self.order_id,
            purchase_type: self.purchase_type,
            acknowledgement_state: self.acknowledgement_state,
            kind: self.kind,
            created_at: self.created_at,
        }
    }
}
