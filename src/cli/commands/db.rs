use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::AppStore;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let db_path = Path::new(&cfg.database);
        if !db_path.exists() {
            return Err(AppError::Config(format!(
                "database {} does not exist, run `e2spy init` first",
                db_path.display()
            )));
        }

        // Opened without migrating: this command is where migrations are inspected.
        let mut store = AppStore::open(db_path)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = store.migrate()?;
            if applied.is_empty() {
                println!("{}✔ Nothing to migrate.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}✔ Migrated to schema version {}.{}\n",
                    GREEN,
                    store.current_version()?,
                    RESET
                );
            }
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&store, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String =
                store
                    .conn
                    .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            store.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
