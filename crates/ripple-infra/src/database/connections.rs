use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Database connection configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How many times to retry the initial connection before giving up.
    /// The database container may still be starting when the server boots.
    pub connect_attempts: u32,
}

/// Connect to the database, waiting for it to become available.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let attempts = config.connect_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match try_connect(opts.clone()).await {
            Ok(conn) => {
                tracing::info!("Database connected (pool: {})", config.max_connections);
                return Ok(conn);
            }
            Err(e) if attempt < attempts => {
                tracing::warn!(
                    "Database unavailable (attempt {attempt}/{attempts}): {e}; retrying in 1s"
                );
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn try_connect(opts: ConnectOptions) -> Result<DbConn, DbErr> {
    // The pool connects lazily; ping to prove the database is actually up.
    let conn = Database::connect(opts).await?;
    conn.ping().await?;
    Ok(conn)
}
