use crate::model::statistics::CountsDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub users: u64,
    pub categories: u64,
    pub books: u64,
    pub chapters: u64,
    pub episodes: u64,
}

impl Counts {
    pub fn into_dto(self) -> CountsDto {
        CountsDto {
            users: self.users,
            categories: self.categories,
            books: self.books,
            chapters: self.chapters,
            episodes: self.episodes,
        }
    }
}
