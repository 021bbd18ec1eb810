use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod category;
pub mod question;

pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;
pub type SqlitePooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

mod embedded {
    refinery::embed_migrations!("migrations");
}

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn get_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\trivia-api")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/trivia-api")
    }
}

pub fn default_db_path() -> PathBuf {
    get_data_dir().join("trivia.db")
}

/// Opens a connection pool on the SQLite file at `path`, creating parent
/// directories as needed. Connections are handed out per request and go
/// back to the pool when dropped.
pub fn open_pool(path: &Path, max_size: u32) -> Result<SqlitePool, r2d2::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let manager = SqliteConnectionManager::file(path)
        .with_init(|conn: &mut Connection| conn.busy_timeout(BUSY_TIMEOUT));

    r2d2::Pool::builder().max_size(max_size).build(manager)
}

pub fn run_migrations(conn: &mut Connection) -> Result<refinery::Report, refinery::Error> {
    embedded::migrations::runner().run(conn)
}

#[cfg(test)]
pub(crate) fn test_pool() -> (tempfile::TempDir, SqlitePool) {
    let temp_dir = tempfile::tempdir().unwrap();
    let pool = open_pool(&temp_dir.path().join("test.db"), 4).unwrap();
    {
        let mut conn = pool.get().unwrap();
        run_migrations(&mut conn).unwrap();
    }
    (temp_dir, pool)
}
