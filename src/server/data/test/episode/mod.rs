use crate::server::{
    data::episode::{EpisodeRepository, Neighbour},
    model::episode::{Episode, EpisodeSearchParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_by_chapter;
mod get_neighbour;
mod search;
mod set_content;
mod toggle_top;
