pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod panel;
pub mod recent_teams;
pub mod schedule;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use recent_teams::RecentTeamsCache;
pub use state::AppState;
pub use storage::load_book;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
