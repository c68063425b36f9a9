//! Nerd Core Library
//!
//! Storage, resource tables and HTTP dispatch for the nerd flashcard server.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod server;
pub mod table;
