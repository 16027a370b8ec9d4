pub use super::episodes::Entity as Episodes;
pub use super::seasons::Entity as Seasons;
pub use super::titles::Entity as Titles;
pub use super::users::Entity as Users;
