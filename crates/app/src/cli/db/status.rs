use std::collections::HashMap;

use clap::Args;
use sqlx::{PgPool, query_as};
use storefront_app::database::{self, MIGRATOR};

/// Postgres SQLSTATE for a missing relation.
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Debug, Args)]
pub(crate) struct StatusArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: StatusArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let applied = applied_versions(&pool)
        .await
        .map_err(|error| format!("failed to read migration history: {error}"))?;

    for migration in MIGRATOR.iter() {
        if migration.migration_type.is_down_migration() {
            continue;
        }

        let state = match applied.get(&migration.version) {
            Some(true) => "applied",
            Some(false) => "failed",
            None => "pending",
        };

        println!("{state:<8} {} {}", migration.version, migration.description);
    }

    Ok(())
}

async fn applied_versions(pool: &PgPool) -> Result<HashMap<i64, bool>, sqlx::Error> {
    let rows = query_as::<_, (i64, bool)>("SELECT version, success FROM _sqlx_migrations")
        .fetch_all(pool)
        .await;

    match rows {
        Ok(rows) => Ok(rows.into_iter().collect()),
        Err(sqlx::Error::Database(error)) if error.code().as_deref() == Some(UNDEFINED_TABLE) => {
            Ok(HashMap::new())
        }
        Err(error) => Err(error),
    }
}
