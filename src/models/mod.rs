pub mod episode;
pub mod title;

pub use episode::{Episode, EpisodeInput, Season, SeasonInput};
pub use title::{NewTitle, Title};
