use crate::server::{
    collection::CollectionQuery,
    data::category::CategoryRepository,
    model::category::{CategoryProperties, CreateCategoryParams, UpdateCategoryParams},
};
use entity::prelude::*;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_collection;
mod update;
