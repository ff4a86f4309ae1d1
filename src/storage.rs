use crate::errors::AppError;
use crate::schedule::ScheduleBook;
use std::path::Path;
use tokio::fs;
use tracing::error;

pub async fn load_book(path: &Path) -> ScheduleBook {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(book) => book,
            Err(err) => {
                error!("failed to parse schedule file: {err}");
                ScheduleBook::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ScheduleBook::default(),
        Err(err) => {
            error!("failed to read schedule file: {err}");
            ScheduleBook::default()
        }
    }
}

pub async fn persist_book(path: &Path, book: &ScheduleBook) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(book).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let book = load_book(&dir.path().join("state.json")).await;
        assert!(book.schedules.is_empty());
        assert_eq!(book.next_id, 1);
    }

    #[tokio::test]
    async fn persisted_book_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let book = ScheduleBook {
            schedules: Vec::new(),
            next_id: 7,
        };

        persist_book(&path, &book).await.unwrap();
        assert_eq!(load_book(&path).await.next_id, 7);
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, b"{oops").await.unwrap();
        assert_eq!(load_book(&path).await.next_id, 1);
    }
}
