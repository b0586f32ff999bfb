pub mod job_notes;
pub mod migrate;
pub mod pages;
pub mod pool;
pub mod settings;
pub mod stats;

pub use migrate::{MIGRATIONS, current_version, run_pending_migrations};
pub use pool::{AppStore, StorePool};
pub use settings::E2ConnectionInfo;
