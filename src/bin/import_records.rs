//! Loads hospital records from a JSON fixtures file into the database.
//!
//! The file holds one camelCase array per resource, e.g.
//! `{"employees": [...], "patients": [...], "invoices": [...]}`; missing
//! arrays are skipped. Records are inserted parents first so foreign keys
//! resolve, all in one transaction: a failing row leaves the database as it
//! was and the file can be fixed and imported again.

use std::env;
use std::fs;

use dotenvy::dotenv;

use pushkind_hospital::db::establish_connection_pool;
use pushkind_hospital::models::config::ServerConfig;
use pushkind_hospital::repository::DieselRepository;
use pushkind_hospital::repository::batch::{BatchWriter, RecordBatch};

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(path) = env::args().nth(1) else {
        log::error!("Usage: import_records <fixtures.json>");
        std::process::exit(2);
    };

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let batch: RecordBatch = match fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
    {
        Ok(batch) => batch,
        Err(err) => {
            log::error!("Cannot read fixtures from {path}: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    match repo.create_batch(&batch) {
        Ok(counts) => {
            log::info!("Imported {} records: {counts:?}", counts.total());
        }
        Err(err) => {
            log::error!("Import failed, nothing was written: {err}");
            std::process::exit(1);
        }
    }
}
