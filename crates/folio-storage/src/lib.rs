pub mod db;
pub mod migrations;
pub mod models;
pub mod seed;

pub use db::Database;
pub use models::{sort_by_recency, Project, ProjectCategory, SyncConfig};
