//! CLI commands for nerd

pub mod dispatch;
pub mod init_db;
pub mod serve;
