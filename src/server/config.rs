use chrono::Duration;

use crate::server::{error::config::ConfigError, util::parse::parse_duration};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";

/// Service-account fields for the Google Play Developer API.
#[derive(Clone)]
pub struct GoogleServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
}

pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub cors_allowed_origins: Vec<String>,

    pub access_token_secret: String,
    pub access_token_expiration: Duration,
    pub refresh_token_secret: String,
    pub refresh_token_expiration: Duration,

    pub admin_email: Option<String>,
    pub admin_password: Option<String>,

    pub assemblyai_api_key: Option<String>,
    pub google_service_account: Option<GoogleServiceAccount>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let google_service_account = match (
            optional("GOOGLE_PROJECT_ID"),
            optional("GOOGLE_CLIENT_EMAIL"),
            optional("GOOGLE_PRIVATE_KEY"),
        ) {
            (Some(project_id), Some(client_email), Some(private_key)) => {
                Some(GoogleServiceAccount {
                    project_id,
                    client_email,
                    private_key: private_key.replace("\\n", "\n"),
                })
            }
            _ => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            server_addr: optional("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            cors_allowed_origins: optional("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            access_token_secret: required("ACCESS_TOKEN_SECRET")?,
            access_token_expiration: parse_duration(
                "ACCESS_TOKEN_EXPIRATION",
                &required("ACCESS_TOKEN_EXPIRATION")?,
            )?,
            refresh_token_secret: required("REFRESH_TOKEN_SECRET")?,
            refresh_token_expiration: parse_duration(
                "REFRESH_TOKEN_EXPIRATION",
                &required("REFRESH_TOKEN_EXPIRATION")?,
            )?,
            admin_email: optional("ADMIN_EMAIL"),
            admin_password: optional("ADMIN_PASSWORD"),
            assemblyai_api_key: optional("ASSEMBLYAI_API_KEY"),
            google_service_account,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
