use crate::cli::parser::Commands;
use crate::cli::commands::open_store;
use crate::config::Config;
use crate::db::AppStore;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW, colorize_optional};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings {
        print,
        e2_hostname,
        e2_user,
        e2_password,
        e2_database,
    } = cmd
    {
        let store = open_store(cfg)?;

        let updates: [(Option<&String>, fn(&AppStore, &str) -> AppResult<()>); 4] = [
            (e2_hostname.as_ref(), AppStore::set_e2_hostname),
            (e2_user.as_ref(), AppStore::set_e2_user),
            (e2_password.as_ref(), AppStore::set_e2_password),
            (e2_database.as_ref(), AppStore::set_e2_database),
        ];

        let mut changed = 0;
        for (value, setter) in updates {
            if let Some(v) = value {
                setter(&store, v)?;
                changed += 1;
            }
        }

        if changed > 0 {
            success(format!("Saved {changed} connection setting(s)."));
        }

        if *print || changed == 0 {
            print_settings(&store)?;
        }
    }

    Ok(())
}

fn print_settings(store: &AppStore) -> AppResult<()> {
    let shown = |v: Option<String>| colorize_optional(&v.unwrap_or_else(|| "--".to_string()));
    let password = store
        .e2_password()?
        .filter(|p| !p.is_empty())
        .map(|_| "********".to_string());

    println!("E2 hostname : {}", shown(store.e2_hostname()?));
    println!("E2 user     : {}", shown(store.e2_user()?));
    println!("E2 password : {}", shown(password));
    println!("E2 database : {}", shown(store.e2_database()?));

    if store.e2_database_configured()? {
        println!("Status      : {GREEN}configured{RESET}");
    } else {
        println!("Status      : {YELLOW}not configured{RESET}");
        warning(format!(
            "{GREY}Reports stay unavailable until all four E2 settings are filled in.{RESET}"
        ));
    }
    Ok(())
}
