use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct CountsDto {
    pub users: u64,
    pub categories: u64,
    pub books: u64,
    pub chapters: u64,
    pub episodes: u64,
}
