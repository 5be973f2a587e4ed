use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::server::model::iap::{
    GooglePlayTransaction, SubscriptionPurchase, VerifyAndroidReceiptParams,
};

pub struct GooglePlayTransactionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GooglePlayTransactionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a verified subscription purchase.
    ///
    /// Numeric and boolean fields of the purchase are stored as their string form.
    pub async fn create(
        &self,
        params: VerifyAndroidReceiptParams,
        purchase: SubscriptionPurchase,
    ) -> Result<GooglePlayTransaction, DbErr> {
        let entity = entity::google_play_transaction::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            package_name: ActiveValue::Set(params.package_name),
            product_id: ActiveValue::Set(params.product_id),
            purchase_token: ActiveValue::Set(params.purchase_token),
            start_time_millis: ActiveValue::Set(purchase.start_time_millis),
            expiry_time_millis: ActiveValue::Set(purchase.expiry_time_millis),
            auto_renewing: ActiveValue::Set(purchase.auto_renewing.map(|v| v.to_string())),
            price_currency_code: ActiveValue::Set(purchase.price_currency_code),
            price_amount_micros: ActiveValue::Set(purchase.price_amount_micros),
            country_code: ActiveValue::Set(purchase.country_code),
            developer_payload: ActiveValue::Set(purchase.developer_payload),
            cancel_reason: ActiveValue::Set(purchase.cancel_reason.map(|v| v.to_string())),
            user_cancellation_time_millis: ActiveValue::Set(
                purchase.user_cancellation_time_millis,
            ),
            order_id: ActiveValue::Set(purchase.order_id),
            purchase_type: ActiveValue::Set(purchase.purchase_type.map(|v| v.to_string())),
            acknowledgement_state: ActiveValue::Set(
                purchase.acknowledgement_state.map(|v| v.to_string()),
            ),
            kind: ActiveValue::Set(purchase.kind),
            is_deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(GooglePlayTransaction::from_entity(entity))
    }
}
