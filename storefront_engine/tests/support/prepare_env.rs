use std::path::Path;

use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};
use storefront_common::Secret;
use storefront_engine::{OrderFlowApi, OrderManagement, SqliteDatabase};

use super::fake_gateway::FakeGateway;

pub const TEST_SECRET: &str = "test_secret";

pub async fn prepare_test_env(url: &str) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    run_migrations(url).await;
}

pub fn random_db_path() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/storefront_test_{}.db", dir.display(), rand::random::<u64>())
}

pub async fn run_migrations(url: &str) {
    let db = SqliteDatabase::new_with_url(url, 1).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    db.close().await;
    info!("🚀️ Migrations complete");
}

pub async fn create_database<P: AsRef<Path>>(path: P) {
    let p = path.as_ref().as_os_str().to_str().unwrap();
    if Sqlite::database_exists(p).await.unwrap_or(false) {
        if let Err(e) = Sqlite::drop_database(p).await {
            warn!("Error dropping database {p}: {e:?}");
        }
    }
    Sqlite::create_database(p).await.expect("Error creating database");
    info!("Created Sqlite database {p}");
}

/// A fresh database with the schema in place
pub async fn new_test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

pub async fn new_order_flow_api() -> OrderFlowApi<SqliteDatabase, FakeGateway> {
    let db = new_test_db().await;
    OrderFlowApi::new(db, FakeGateway::default(), Secret::from(TEST_SECRET))
}

pub async fn tear_down(db: &SqliteDatabase) {
    db.close().await;
    if let Err(e) = Sqlite::drop_database(db.url()).await {
        warn!("🚀️ Failed to remove test database {}: {e}", db.url());
    }
}
