pub mod chat;
pub mod config;
pub mod helpers;
pub mod projects;
pub mod sync;
