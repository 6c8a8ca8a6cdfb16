mod export;
mod movies;
mod watched;
mod watchlist;

pub use export::cmd_export;
pub use movies::{cmd_search, cmd_show};
pub use watched::{cmd_remove_watched, cmd_review, cmd_watch, cmd_watched};
pub use watchlist::{cmd_add, cmd_list, cmd_remove, cmd_reorder};
