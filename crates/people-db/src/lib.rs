//! # people-db
//!
//! SQLite database layer for the people & notes service.
//!
//! This crate provides:
//! - Connection pool management
//! - Schema migrations (`person`, `note` with cascading delete)
//! - Repository implementations for people and notes
//! - A sample data loader
//!
//! ## Example
//!
//! ```rust,ignore
//! use people_db::{Database, PersonInput, PersonRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://people.db").await?;
//!     db.migrate().await?;
//!
//!     let person = db.people.create(PersonInput::new("Doug", "Farrell")).await?;
//!     println!("Created person: {}", person.person_id);
//!     Ok(())
//! }
//! ```
pub mod notes;
pub mod people;
pub mod pool;
pub mod seed;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod test_fixtures;

// Re-export core types
pub use people_core::*;

// Re-export repository implementations
pub use notes::SqliteNoteRepository;
pub use people::SqlitePersonRepository;
pub use pool::{
    create_pool, create_pool_with_config, log_pool_metrics, remove_database_file,
    sqlite_file_path, PoolConfig, DEFAULT_DATABASE_URL,
};
pub use seed::{seed, SeedPerson, SeedSummary, SAMPLE_PEOPLE};

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Sqlite>,
    /// Person repository for CRUD operations.
    pub people: SqlitePersonRepository,
    /// Note repository for CRUD operations.
    pub notes: SqliteNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        Self {
            people: SqlitePersonRepository::new(pool.clone()),
            notes: SqliteNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!(
            subsystem = "database",
            component = "migrations",
            op = "run",
            "Migrations applied"
        );
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        &self.pool
    }
}
