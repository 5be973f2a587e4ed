//! User data repository.
//!
//! Returns entity models rather than domain models: the auth service needs the password hash,
//! refresh-token hash and reset code columns, which the `User` domain model omits.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter,
};

use crate::server::{
    collection::{self, Collection, ParsedQuery},
    model::user::{CreateUserParams, Role, UpdateUserParams},
};

use entity::user::Column;

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a user. `params.password` must already be hashed.
    pub async fn create(&self, params: CreateUserParams) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            password: ActiveValue::Set(params.password),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            date_of_birth: ActiveValue::Set(params.date_of_birth),
            gender: ActiveValue::Set(params.gender),
            address: ActiveValue::Set(params.address),
            phone_number: ActiveValue::Set(params.phone_number),
            refresh_token: ActiveValue::Set(None),
            reset_token: ActiveValue::Set(None),
            reset_token_expires_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn get_collection(
        &self,
        query: ParsedQuery<Column>,
    ) -> Result<Collection<entity::user::Model>, DbErr> {
        collection::collect(self.db, entity::prelude::User::find(), query).await
    }

    /// Checks whether at least one admin exists.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(Column::Role.eq(Role::Admin.as_str()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Applies the populated profile fields of `params`.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Updated user
    /// - `Ok(None)` - No user with that id
    pub async fn update(
        &self,
        params: UpdateUserParams,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let Some(existing) = self.find_by_id(params.id).await? else {
            return Ok(None);
        };

        let mut active = existing.clone().into_active_model();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(role) = params.role {
            active.role = ActiveValue::Set(role.as_str().to_string());
        }
        if let Some(date_of_birth) = params.date_of_birth {
            active.date_of_birth = ActiveValue::Set(Some(date_of_birth));
        }
        if let Some(gender) = params.gender {
            active.gender = ActiveValue::Set(Some(gender));
        }
        if let Some(address) = params.address {
            active.address = ActiveValue::Set(Some(address));
        }
        if let Some(phone_number) = params.phone_number {
            active.phone_number = ActiveValue::Set(Some(phone_number));
        }

        if !active.is_changed() {
            return Ok(Some(existing));
        }

        Ok(Some(active.update(self.db).await?))
    }

    /// Stores (or clears) the hash of the user's current refresh token.
    pub async fn set_refresh_token(&self, id: i32, token_hash: Option<String>) -> Result<(), DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            refresh_token: ActiveValue::Set(token_hash),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Replaces the password hash and clears any pending reset code.
    pub async fn set_password(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            password: ActiveValue::Set(password_hash),
            reset_token: ActiveValue::Set(None),
            reset_token_expires_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn set_reset_token(
        &self,
        id: i32,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            reset_token: ActiveValue::Set(Some(token)),
            reset_token_expires_at: ActiveValue::Set(Some(expires_at)),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
