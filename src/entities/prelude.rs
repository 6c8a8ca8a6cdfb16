pub use super::movies::Entity as Movies;
pub use super::users::Entity as Users;
pub use super::watch_list::Entity as WatchList;
pub use super::watched_list::Entity as WatchedList;
