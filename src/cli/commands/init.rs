use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::{Operation, ttlog};
use crate::db::store::LocationStore;
use crate::errors::AppResult;
use log::warn;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and its schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rGeologger…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let store = LocationStore::open(&db_path)?;

    println!("✅ Database initialized at {}", &db_path);

    // Internal log is best effort
    if let Err(e) = ttlog(
        store.conn(),
        Operation::Init,
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warn!("Failed to write internal log: {e}");
    }

    println!("🎉 rGeologger initialization completed!");
    Ok(())
}
