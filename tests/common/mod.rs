//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use homie_stays::db::{DbPool, establish_connection_pool};
use homie_stays::domain::pricing::{Extra, PricingBasis, PricingRule};
use homie_stays::domain::property::NewProperty;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
///
/// The backing file lives in a scratch directory removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir.");
        let path = dir.path().join(filename);
        let database_url = path.to_str().expect("Temp path is not UTF-8.");

        let pool =
            establish_connection_pool(database_url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Weekday 100.00, weekend 150.00, 10% off weekly stays.
pub fn beach_pricing() -> PricingRule {
    PricingRule::new(10_000)
        .with_weekend_price(15_000)
        .with_weekly_discount(10)
        .with_extra(Extra::new("Breakfast", 2_000, PricingBasis::PerPerson))
        .with_extra(Extra::new("Cleaning", 3_000, PricingBasis::PerStay))
}

pub fn beach_house(owner_id: &str) -> NewProperty {
    NewProperty::new(owner_id, "Beach house", "Robertsport", 4)
        .with_description("Two rooms facing the surf")
        .with_pricing(beach_pricing())
        .published()
}
