use crate::recent_teams::RecentTeamsCache;
use crate::schedule::ScheduleBook;
use crate::store::JsonFileStore;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub book: Arc<Mutex<ScheduleBook>>,
    pub recent_teams: Arc<RecentTeamsCache<JsonFileStore>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, book: ScheduleBook, store: JsonFileStore) -> Self {
        Self {
            data_path,
            book: Arc::new(Mutex::new(book)),
            recent_teams: Arc::new(RecentTeamsCache::new(store)),
        }
    }
}
