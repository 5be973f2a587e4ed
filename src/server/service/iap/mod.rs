//! In-app purchase receipt verification.

pub mod google_play;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::google_play_transaction::GooglePlayTransactionRepository,
    error::AppError,
    model::iap::{GooglePlayTransaction, VerifyAndroidReceiptParams},
};

use google_play::GooglePlayDatasource;

pub struct IapService<'a> {
    db: &'a DatabaseConnection,
    play_store: Option<&'a dyn GooglePlayDatasource>,
}

impl<'a> IapService<'a> {
    pub fn new(db: &'a DatabaseConnection, play_store: Option<&'a dyn GooglePlayDatasource>) -> Self {
        Self { db, play_store }
    }

    /// Verifies an Android subscription purchase with Google Play and records it.
    ///
    /// # Returns
    /// - `Ok(GooglePlayTransaction)` - The stored transaction
    /// - `Err(AppError::Unavailable)` - Google Play credentials are not configured
    /// - `Err(AppError::Upstream)` - Google Play rejected the receipt
    pub async fn verify_android_receipt(
        &self,
        params: VerifyAndroidReceiptParams,
    ) -> Result<GooglePlayTransaction, AppError> {
        let play_store = self.play_store.ok_or_else(|| {
            AppError::Unavailable("Android receipt verification is not configured".to_string())
        })?;

        let purchase = play_store
            .get_subscription_purchase(
                &params.package_name,
                &params.product_id,
                &params.purchase_token,
            )
            .await?;

        let transaction = GooglePlayTransactionRepository::new(self.db)
            .create(params, purchase)
            .await?;

        tracing::info!(
            user_id = transaction.user_id,
            product_id = %transaction.product_id,
            order_id = ?transaction.order_id,
            "Android receipt verified"
        );

        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;
    use crate::server::{model::iap::SubscriptionPurchase, service::iap::google_play::VERIFY_FAILURE};

    struct FakePlayStore {
        accept: bool,
    }

    #[async_trait]
    impl GooglePlayDatasource for FakePlayStore {
        async fn get_subscription_purchase(
            &self,
            _package_name: &str,
            _product_id: &str,
            _token: &str,
        ) -> Result<SubscriptionPurchase, AppError> {
            if !self.accept {
                return Err(AppError::Upstream(
                    VERIFY_FAILURE.to_string(),
                    "410 Gone".to_string(),
                ));
            }

            Ok(SubscriptionPurchase {
                kind: Some("androidpublisher#subscriptionPurchase".to_string()),
                start_time_millis: Some("1700000000000".to_string()),
                expiry_time_millis: Some("1702592000000".to_string()),
                auto_renewing: Some(true),
                order_id: Some("GPA.1234".to_string()),
                acknowledgement_state: Some(1),
                ..Default::default()
            })
        }
    }

    fn params(user_id: i32) -> VerifyAndroidReceiptParams {
        VerifyAndroidReceiptParams {
            user_id,
            purchase_token: "token".to_string(),
            package_name: "com.example.podcast".to_string(),
            product_id: "premium_monthly".to_string(),
        }
    }

    /// Tests a verified purchase is stored with the requesting user.
    #[tokio::test]
    async fn stores_verified_purchase() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await.unwrap();

        let store = FakePlayStore { accept: true };
        let transaction = IapService::new(db, Some(&store))
            .verify_android_receipt(params(user.id))
            .await
            .unwrap();

        assert_eq!(transaction.user_id, user.id);
        assert_eq!(transaction.product_id, "premium_monthly");
        assert_eq!(transaction.order_id.as_deref(), Some("GPA.1234"));
        assert_eq!(transaction.auto_renewing.as_deref(), Some("true"));
        assert_eq!(transaction.acknowledgement_state.as_deref(), Some("1"));
    }

    /// Tests rejected receipts surface as upstream errors and store nothing.
    #[tokio::test]
    async fn rejected_purchase_is_upstream_error() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await.unwrap();

        let store = FakePlayStore { accept: false };
        let result = IapService::new(db, Some(&store))
            .verify_android_receipt(params(user.id))
            .await;

        assert!(matches!(result, Err(AppError::Upstream(msg, _)) if msg == VERIFY_FAILURE));
    }

    /// Tests verification is unavailable without credentials.
    #[tokio::test]
    async fn unconfigured_is_unavailable() {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = IapService::new(db, None)
            .verify_android_receipt(params(1))
            .await;

        assert!(matches!(result, Err(AppError::Unavailable(_))));
    }
}
