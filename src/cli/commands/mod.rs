mod ingest;
mod init;
mod key;
mod list;
mod user;

pub use ingest::cmd_ingest;
pub use init::cmd_init;
pub use key::cmd_set_tmdb_key;
pub use list::cmd_list_titles;
pub use user::{cmd_user_add, cmd_user_list, cmd_user_passwd, cmd_user_remove};
