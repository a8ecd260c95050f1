use std::sync::Arc;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub async fn init(config: Config) -> Result<Self, sqlx::Error> {
        // An in-memory database lives exactly as long as its connection.
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(config.database.max_connections.max(1))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(config.database.with_db()?)
            .await?;

        if config.application.run_migration {
            tracing::warn!("Running database migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
        }

        Ok(AppState { pool, config })
    }
}
