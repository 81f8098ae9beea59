//! Test fixtures for database integration tests.
//!
//! Each [`TestDatabase`] lives in its own temporary directory, so tests run in
//! parallel without sharing rows.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use people_db::test_fixtures::TestDatabase;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let test_db = TestDatabase::seeded().await;
//!     let people = test_db.db.people.read_all().await.unwrap();
//!     assert_eq!(people.len(), 3);
//! }
//! ```

use tempfile::TempDir;

use crate::{seed, Database, PoolConfig, SAMPLE_PEOPLE};

/// A migrated database in a throwaway directory.
pub struct TestDatabase {
    pub db: Database,
    pub database_url: String,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create an empty, migrated database.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_url = format!("sqlite://{}", dir.path().join("people.db").display());

        let db = Database::connect_with_config(&database_url, PoolConfig::default())
            .await
            .expect("Failed to open test database");
        db.migrate().await.expect("Failed to run migrations");

        Self {
            db,
            database_url,
            _dir: dir,
        }
    }

    /// Create a migrated database loaded with the sample people and notes.
    pub async fn seeded() -> Self {
        let test_db = Self::new().await;
        seed(test_db.db.pool(), SAMPLE_PEOPLE, true)
            .await
            .expect("Failed to seed test database");
        test_db
    }

    /// Number of rows in `table`.
    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count rows")
    }
}
