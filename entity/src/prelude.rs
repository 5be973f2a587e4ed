pub use super::book::Entity as Book;
pub use super::category::Entity as Category;
pub use super::chapter::Entity as Chapter;
pub use super::episode::Entity as Episode;
pub use super::google_play_transaction::Entity as GooglePlayTransaction;
pub use super::user::Entity as User;
pub use super::user_favorite_episode::Entity as UserFavoriteEpisode;
