pub mod list;
pub mod movie;
