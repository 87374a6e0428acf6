pub mod init;
pub mod list;
pub mod offline;
pub mod play;
pub mod review;
pub mod validate;
