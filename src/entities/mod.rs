pub mod prelude;

pub mod movies;
pub mod users;
pub mod watch_list;
pub mod watched_list;
