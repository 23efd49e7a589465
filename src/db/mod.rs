pub mod bookmarkdb;
pub mod chatdb;
pub mod customjobdb;
#[allow(clippy::module_inception)]
pub mod db;
pub mod jobdb;
pub mod notificationdb;
pub mod reviewdb;
pub mod userdb;
