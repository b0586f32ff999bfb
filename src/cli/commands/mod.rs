pub mod config;
pub mod db;
pub mod init;
pub mod notes;
pub mod page;
pub mod range;
pub mod settings;

use crate::config::Config;
use crate::db::{AppStore, StorePool};
use crate::errors::AppResult;

/// Open the configured store, applying pending migrations first.
pub(crate) fn open_store(cfg: &Config) -> AppResult<AppStore> {
    let pool = StorePool::new(&cfg.database);
    pool.init()?;
    pool.open()
}
