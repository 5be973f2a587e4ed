//! User domain models and parameters.
//!
//! Password hashes, refresh-token hashes and reset codes stay on the entity model inside the
//! auth service; the `User` domain model only carries profile data.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use entity::user::Column;

use crate::{
    model::{
        auth::SignUpDto,
        user::{CreateUserDto, ProfileDto, RoleDto, UpdateUserDto, UserDto},
    },
    server::{
        collection::{CollectionProperties, Field},
        error::{internal::InternalError, AppError},
    },
};

/// Access role stored on each user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    pub fn into_dto(self) -> RoleDto {
        match self {
            Self::Admin => RoleDto::Admin,
            Self::User => RoleDto::User,
        }
    }
}

impl From<RoleDto> for Role {
    fn from(dto: RoleDto) -> Self {
        match dto {
            RoleDto::Admin => Self::Admin,
            RoleDto::User => Self::User,
        }
    }
}

impl FromStr for Role {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(InternalError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(InvalidRole))` - The stored role is not recognised
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            role: entity.role.parse()?,
            date_of_birth: entity.date_of_birth,
            gender: entity.gender,
            address: entity.address,
            phone_number: entity.phone_number,
            created_at: entity.created_at,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role.into_dto(),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            address: self.address,
            phone_number: self.phone_number,
            created_at: self.created_at,
        }
    }
}

/// The signed-in user's profile together with their favorite episode ids.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub favorite_episode_ids: Vec<i32>,
}

impl Profile {
    pub fn into_dto(self) -> ProfileDto {
        ProfileDto {
            user: self.user.into_dto(),
            favorite_episode_ids: self.favorite_episode_ids,
        }
    }
}

/// Parameters for inserting a user. `password` must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl CreateUserParams {
    /// Builds insert parameters from an admin request with the password already hashed.
    pub fn from_dto(dto: CreateUserDto, password_hash: String) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            password: password_hash,
            role: dto.role.map(Role::from).unwrap_or_default(),
            date_of_birth: dto.date_of_birth,
            gender: dto.gender,
            address: dto.address,
            phone_number: dto.phone_number,
        }
    }

    /// Self-registration always creates a regular user.
    pub fn from_sign_up(dto: SignUpDto, password_hash: String) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            password: password_hash,
            role: Role::User,
            date_of_birth: dto.date_of_birth,
            gender: dto.gender,
            address: dto.address,
            phone_number: dto.phone_number,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl UpdateUserParams {
    pub fn from_dto(id: i32, dto: UpdateUserDto) -> Self {
        Self {
            id,
            name: dto.name,
            email: dto.email,
            role: dto.role.map(Role::from),
            date_of_birth: dto.date_of_birth,
            gender: dto.gender,
            address: dto.address,
            phone_number: dto.phone_number,
        }
    }
}

pub struct UserProperties;

impl CollectionProperties for UserProperties {
    type Entity = entity::prelude::User;

    const FIELDS: &'static [Field<Column>] = &[
        Field::text("name", Column::Name).folded(Column::NameSearch),
        Field::text("email", Column::Email),
        Field::text("role", Column::Role),
        Field::timestamp("created_at", Column::CreatedAt),
    ];

    fn id_column() -> Column {
        Column::Id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_storage_string() {
        for role in [Role::Admin, Role::User] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("owner".parse::<Role>().is_err());
    }
}
