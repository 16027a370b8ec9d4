pub mod season;
pub mod title;
pub mod user;
