mod book;
mod category;
mod episode;
mod favorite;
mod statistics;
mod user;
