use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::StorePool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with --test)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("⚙️  Initializing e2spy…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db_path.display());

    let pool = StorePool::new(&db_path);
    let applied = pool.init()?;

    if applied.is_empty() {
        info("Database schema already up to date.");
    } else {
        let list: Vec<String> = applied.iter().map(|v| v.to_string()).collect();
        success(format!("Applied schema versions: {}", list.join(", ")));
    }

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
