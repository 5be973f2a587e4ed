use sea_orm::DatabaseConnection;

use crate::{
    model::user::CreateUserDto,
    server::{
        collection::{Collection, CollectionQuery},
        data::{episode::EpisodeRepository, favorite::FavoriteRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::{
            episode::Episode,
            user::{CreateUserParams, Profile, UpdateUserParams, User, UserProperties},
        },
        service::auth::password::hash_secret,
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user on behalf of an admin, hashing the given password.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AuthError::UserExists)` - The email is already registered
    pub async fn create(&self, dto: CreateUserDto) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_email(&dto.email).await?.is_some() {
            return Err(AuthError::UserExists.into());
        }

        let password_hash = hash_secret(&dto.password)?;
        let user = repo
            .create(CreateUserParams::from_dto(dto, password_hash))
            .await?;

        User::from_entity(user)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Gets a user with the ids of their favorite episodes.
    ///
    /// Returns None if the user doesn't exist
    pub async fn get_profile(&self, id: i32) -> Result<Option<Profile>, AppError> {
        let Some(user) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let favorite_episode_ids = FavoriteRepository::new(self.db)
            .get_episode_ids(id)
            .await?;

        Ok(Some(Profile {
            user,
            favorite_episode_ids,
        }))
    }

    pub async fn get_collection(&self, query: &CollectionQuery) -> Result<Collection<User>, AppError> {
        let parsed = query.parse::<UserProperties>()?;

        UserRepository::new(self.db)
            .get_collection(parsed)
            .await?
            .try_map(User::from_entity)
    }

    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - The user doesn't exist
    /// - `Err(AuthError::UserExists)` - The new email belongs to another user
    pub async fn update(&self, params: UpdateUserParams) -> Result<Option<User>, AppError> {
        let repo = UserRepository::new(self.db);

        if let Some(email) = params.email.as_deref() {
            if let Some(other) = repo.find_by_email(email).await? {
                if other.id != params.id {
                    return Err(AuthError::UserExists.into());
                }
            }
        }

        repo.update(params)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let deleted = UserRepository::new(self.db).delete(id).await?;

        if deleted {
            tracing::info!(user_id = id, "User deleted");
        }

        Ok(deleted)
    }

    /// Adds an episode to the user's favorites. Marking twice has no further effect.
    ///
    /// # Returns
    /// - `Ok(Profile)` - The user's profile after the change
    /// - `Err(AppError::NotFound)` - The episode doesn't exist
    pub async fn mark_favorite(&self, user_id: i32, episode_id: i32) -> Result<Profile, AppError> {
        self.ensure_episode(episode_id).await?;

        FavoriteRepository::new(self.db)
            .add(user_id, episode_id)
            .await?;

        self.profile_or_unauthorized(user_id).await
    }

    /// Removes an episode from the user's favorites.
    ///
    /// # Returns
    /// - `Ok(Profile)` - The user's profile after the change
    /// - `Err(AppError::NotFound)` - The episode doesn't exist
    pub async fn unmark_favorite(
        &self,
        user_id: i32,
        episode_id: i32,
    ) -> Result<Profile, AppError> {
        self.ensure_episode(episode_id).await?;

        FavoriteRepository::new(self.db)
            .remove(user_id, episode_id)
            .await?;

        self.profile_or_unauthorized(user_id).await
    }

    /// Gets the user's favorite episodes, most recently favorited first.
    pub async fn get_favorite_episodes(&self, user_id: i32) -> Result<Vec<Episode>, AppError> {
        Ok(FavoriteRepository::new(self.db)
            .get_episodes(user_id)
            .await?)
    }

    async fn ensure_episode(&self, episode_id: i32) -> Result<(), AppError> {
        if !EpisodeRepository::new(self.db).exists(episode_id).await? {
            return Err(AppError::NotFound(format!(
                "Episode {} not found",
                episode_id
            )));
        }

        Ok(())
    }

    async fn profile_or_unauthorized(&self, user_id: i32) -> Result<Profile, AppError> {
        self.get_profile(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotInDatabase(user_id).into())
    }
}
