pub mod movie;
pub mod user;
pub mod watched;
pub mod watchlist;
