use crate::server::{
    data::user::UserRepository,
    model::user::{Role, UpdateUserParams},
};
use entity::prelude::*;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod admin_exists;
mod credentials;
mod update;
