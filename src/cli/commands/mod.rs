pub mod config;
pub mod db;
pub mod init;
pub mod last;
pub mod list;
pub mod log;
pub mod permission;
pub mod track;
