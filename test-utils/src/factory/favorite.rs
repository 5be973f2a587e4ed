use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Marks an episode as a favorite of the user.
pub async fn create_favorite(
    db: &DatabaseConnection,
    user_id: i32,
    episode_id: i32,
) -> Result<entity::user_favorite_episode::Model, DbErr> {
    entity::user_favorite_episode::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        episode_id: ActiveValue::Set(episode_id),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
