use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Page {
        page,
        set_password,
        session,
        unlock,
        lock,
        status,
    } = cmd
    {
        let store = open_store(cfg)?;

        if let Some(password) = set_password {
            store.set_page_password(page, password)?;
            success(format!("Password set for page {page}."));
        }

        let Some(session) = session else {
            return Ok(());
        };

        if let Some(password) = unlock {
            if !store.unlock_with_password(session, page, password)? {
                return Err(AppError::WrongPagePassword(page.clone()));
            }
            success(format!("Page {page} unlocked for session {session}."));
        }

        if *lock {
            store.lock_with_companion(session, page)?;
            success(format!("Page {page} locked for session {session}."));
        }

        if *status {
            let state = if store.is_page_unlocked(session, page)? {
                "unlocked"
            } else {
                "locked"
            };
            info(format!("Page {page} is {state} for session {session}."));
        }
    }

    Ok(())
}
