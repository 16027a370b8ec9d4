pub mod prelude;

pub mod episodes;
pub mod seasons;
pub mod titles;
pub mod users;

pub use titles::TitleKind;
