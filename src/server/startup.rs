use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    model::user::{CreateUserDto, RoleDto},
    server::{
        config::Config,
        data::user::UserRepository,
        error::AppError,
        service::{
            iap::google_play::{GooglePlayDatasource, GooglePlayDeveloperApi},
            transcription::{assemblyai::AssemblyAiClient, Transcriber},
            user::UserService,
        },
    },
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// HTTP client shared by the transcription and Play Store integrations.
///
/// Redirects are disabled so credentials in headers are never forwarded to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Seeds an admin account from `ADMIN_EMAIL`/`ADMIN_PASSWORD` when no admin exists yet.
///
/// Logs a warning instead when no admin exists and the credentials are not configured.
pub async fn check_for_admin(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    if UserRepository::new(db).admin_exists().await? {
        return Ok(());
    }

    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        tracing::warn!("No admin user exists; set ADMIN_EMAIL and ADMIN_PASSWORD to create one");
        return Ok(());
    };

    let admin = UserService::new(db)
        .create(CreateUserDto {
            name: "Admin".to_string(),
            email: email.clone(),
            password: password.clone(),
            role: Some(RoleDto::Admin),
            ..Default::default()
        })
        .await?;

    tracing::info!(user_id = admin.id, email = %admin.email, "Created initial admin user");

    Ok(())
}

pub fn setup_transcriber(
    config: &Config,
    http_client: &reqwest::Client,
) -> Option<Arc<dyn Transcriber>> {
    match &config.assemblyai_api_key {
        Some(api_key) => Some(Arc::new(AssemblyAiClient::new(
            http_client.clone(),
            api_key.clone(),
        ))),
        None => {
            tracing::info!("ASSEMBLYAI_API_KEY not set; transcription is disabled");
            None
        }
    }
}

pub fn setup_play_store(
    config: &Config,
    http_client: &reqwest::Client,
) -> Result<Option<Arc<dyn GooglePlayDatasource>>, AppError> {
    match &config.google_service_account {
        Some(account) => {
            let api = GooglePlayDeveloperApi::new(http_client.clone(), account)?;
            Ok(Some(Arc::new(api)))
        }
        None => {
            tracing::info!("Google service account not set; receipt verification is disabled");
            Ok(None)
        }
    }
}
