//! Shared SQLite harness for the integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use fenestra::db::establish_connection_pool;
use fenestra::repository::DieselRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// A migrated per-test SQLite database. The backing file (and SQLite's
/// `-shm`/`-wal` side files) are removed when the harness drops, so each
/// test starts from an empty schema.
pub struct TestDb {
    filename: String,
    repo: DieselRepository,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let _ = std::fs::remove_file(filename); // leftovers from a crashed run

        let pool = establish_connection_pool(filename)
            .expect("Failed to establish SQLite connection.");
        pool.get()
            .expect("Failed to get SQLite connection from pool.")
            .run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            filename: filename.to_string(),
            repo: DieselRepository::new(pool),
        }
    }

    /// Repository handle over the temporary database.
    pub fn repo(&self) -> DieselRepository {
        self.repo.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-shm", "-wal"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.filename));
        }
    }
}
