use crate::db::migrate::latest_version;
use crate::db::pool::AppStore;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};
use std::fs;

const COUNTED_TABLES: [&str; 4] = ["settings", "job_notes", "page_passwords", "unlocked_pages"];

pub fn print_db_info(store: &AppStore, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) SCHEMA VERSION
    //
    let current = store.current_version()?;
    let latest = latest_version();
    let color = if current == latest { GREEN } else { RED };
    println!(
        "{}• Schema version:{} {}{}{} (latest {})",
        CYAN, RESET, color, current, RESET, latest
    );

    for m in store.applied_migrations()? {
        let when = m
            .migrated_at
            .unwrap_or_else(|| format!("{GREY}--{RESET}"));
        println!("    v{:<3} {}", m.version, when);
    }

    //
    // 3) ROW COUNTS
    //
    println!("{}• Rows:{}", CYAN, RESET);
    for table in COUNTED_TABLES {
        if store.table_exists(table)? {
            let count: i64 =
                store
                    .conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            println!("    {:<16} {}", table, count);
        } else {
            println!("    {:<16} {GREY}missing{RESET}", table);
        }
    }

    //
    // 4) ERP CONNECTION
    //
    if store.table_exists("settings")? {
        let configured = store.e2_database_configured()?;
        let (color, label) = if configured {
            (GREEN, "configured")
        } else {
            (YELLOW, "not configured")
        };
        println!("{}• E2 database:{} {}{}{}", CYAN, RESET, color, label, RESET);
    }

    println!();
    Ok(())
}
