//! Google Play Developer API access with a service account.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tokio::sync::OnceCell;
use url::Url;
use yup_oauth2::{
    authenticator::DefaultAuthenticator, parse_service_account_key, ServiceAccountAuthenticator,
    ServiceAccountKey,
};

use crate::server::{
    config::GoogleServiceAccount,
    error::{internal::InternalError, AppError},
    model::iap::SubscriptionPurchase,
};

const ANDROID_PUBLISHER_SCOPE: &str = "https://www.googleapis.com/auth/androidpublisher";
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ANDROID_PUBLISHER_API: &str = "https://androidpublisher.googleapis.com/androidpublisher/v3/";

pub(crate) const VERIFY_FAILURE: &str = "Failed to verify receipt";

#[async_trait]
pub trait GooglePlayDatasource: Send + Sync {
    /// purchases.subscriptions.get:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.subscriptions/get
    async fn get_subscription_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<SubscriptionPurchase, AppError>;
}

pub struct GooglePlayDeveloperApi {
    http_client: reqwest::Client,
    key: ServiceAccountKey,
    /// Built on first use; it caches and refreshes the access token itself.
    authenticator: OnceCell<DefaultAuthenticator>,
}

impl GooglePlayDeveloperApi {
    /// # Returns
    /// - `Ok(Self)` - Client ready to request access tokens
    /// - `Err(InternalError::ServiceAccount)` - The configured credentials are malformed
    pub fn new(
        http_client: reqwest::Client,
        account: &GoogleServiceAccount,
    ) -> Result<Self, InternalError> {
        let key_json = serde_json::json!({
            "type": "service_account",
            "project_id": account.project_id,
            "client_email": account.client_email,
            "private_key": account.private_key,
            "token_uri": TOKEN_URI,
        });

        let key = parse_service_account_key(key_json.to_string())
            .map_err(|e| InternalError::ServiceAccount(e.to_string()))?;

        Ok(Self {
            http_client,
            key,
            authenticator: OnceCell::new(),
        })
    }

    async fn access_token(&self) -> Result<String, AppError> {
        let upstream = |detail: String| AppError::Upstream(VERIFY_FAILURE.to_string(), detail);

        let authenticator = self
            .authenticator
            .get_or_try_init(|| ServiceAccountAuthenticator::builder(self.key.clone()).build())
            .await
            .map_err(|e| upstream(format!("service account authenticator: {}", e)))?;

        let token = authenticator
            .token(&[ANDROID_PUBLISHER_SCOPE])
            .await
            .map_err(|e| upstream(format!("service account token: {}", e)))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| upstream("service account token is empty".to_string()))
    }
}

#[async_trait]
impl GooglePlayDatasource for GooglePlayDeveloperApi {
    async fn get_subscription_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<SubscriptionPurchase, AppError> {
        let url = subscription_url(package_name, product_id, token)?;

        let response = self
            .http_client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token().await?))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(
                VERIFY_FAILURE.to_string(),
                format!("purchases.subscriptions.get returned {}: {}", status, body),
            ));
        }

        Ok(response.json().await?)
    }
}

/// Builds the purchases.subscriptions.get URL with each argument as one encoded path segment.
///
/// Empty and dot segments are rejected since `Url` would drop them.
fn subscription_url(package_name: &str, product_id: &str, token: &str) -> Result<Url, AppError> {
    if [package_name, product_id, token]
        .iter()
        .any(|segment| matches!(*segment, "" | "." | ".."))
    {
        return Err(AppError::BadRequest(
            "Package name, product id and token must be non-empty path segments".to_string(),
        ));
    }

    let invalid = || AppError::InternalError(format!("Invalid API base {}", ANDROID_PUBLISHER_API));

    let mut url = Url::parse(ANDROID_PUBLISHER_API).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend([
            "applications",
            package_name,
            "purchases",
            "subscriptions",
            product_id,
            "tokens",
            token,
        ]);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_url_keeps_arguments_in_their_segments() {
        let url = subscription_url("com.example.app", "premium", "abc/../../x?y#z").unwrap();

        assert_eq!(
            url.as_str(),
            "https://androidpublisher.googleapis.com/androidpublisher/v3/applications/com.example.app/purchases/subscriptions/premium/tokens/abc%2F..%2F..%2Fx%3Fy%23z"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.path_segments().map(|s| s.count()), Some(9));
    }

    #[test]
    fn subscription_url_rejects_dot_segments() {
        for token in ["", ".", ".."] {
            assert!(matches!(
                subscription_url("com.example.app", "premium", token),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn failed_authenticator_build_is_not_cached() {
        let api = GooglePlayDeveloperApi::new(
            reqwest::Client::new(),
            &GoogleServiceAccount {
                project_id: "podcast".to_string(),
                client_email: "verifier@podcast.iam.gserviceaccount.com".to_string(),
                private_key: "not a pem key".to_string(),
            },
        )
        .unwrap();

        for _ in 0..2 {
            let result = api.access_token().await;

            assert!(matches!(result, Err(AppError::Upstream(_, _))));
            assert!(!api.authenticator.initialized());
        }
    }

    #[test]
    fn subscription_url_plain_arguments() {
        let url = subscription_url("com.example.app", "monthly", "token-1").unwrap();

        assert_eq!(
            url.path(),
            "/androidpublisher/v3/applications/com.example.app/purchases/subscriptions/monthly/tokens/token-1"
        );
    }
}

