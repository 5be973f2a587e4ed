use crate::server::{
    data::book::BookRepository,
    model::book::{CreateBookParams, UpdateBookParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod toggle_top;
mod update;
