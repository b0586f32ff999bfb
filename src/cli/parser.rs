use crate::core::date_range::ReportKind;
use clap::{Parser, Subcommand};

/// Command-line interface for e2spy
/// Administers the local settings store and previews report parameters
#[derive(Parser)]
#[command(
    name = "e2spy",
    version = env!("CARGO_PKG_VERSION"),
    about = "E2 reporting companion: settings store, job notes, page locks and report date ranges",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use instead of the default")]
        editor: Option<String>,
    },

    /// Manage the local database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show schema version and table statistics")]
        info: bool,
    },

    /// Show or change the E2 connection settings
    Settings {
        #[arg(long = "print", help = "Print the stored connection settings")]
        print: bool,

        #[arg(long = "e2-hostname", value_name = "HOST")]
        e2_hostname: Option<String>,

        #[arg(long = "e2-user", value_name = "USER")]
        e2_user: Option<String>,

        #[arg(long = "e2-password", value_name = "PASSWORD")]
        e2_password: Option<String>,

        #[arg(long = "e2-database", value_name = "NAME")]
        e2_database: Option<String>,
    },

    /// Read, write or export job notes
    Notes {
        #[arg(long = "list", help = "List every job with notes")]
        list: bool,

        #[arg(long = "job", value_name = "JOB", help = "Job number to read or update")]
        job: Option<String>,

        #[arg(
            long = "set",
            value_name = "TEXT",
            requires = "job",
            help = "Replace the job's notes (empty text removes them)"
        )]
        set: Option<String>,

        #[arg(long = "export", value_name = "FILE", help = "Export all notes to an .xlsx file")]
        export: Option<String>,

        #[arg(long, short = 'f', requires = "export", help = "Overwrite an existing export file")]
        force: bool,
    },

    /// Manage the password lock of a report page
    Page {
        /// Page key, e.g. income_statements
        page: String,

        #[arg(long = "set-password", value_name = "PASSWORD")]
        set_password: Option<String>,

        #[arg(long = "session", value_name = "ID", help = "Browser session to lock or unlock")]
        session: Option<String>,

        #[arg(long = "unlock", value_name = "PASSWORD", requires = "session")]
        unlock: Option<String>,

        #[arg(long = "lock", requires = "session", conflicts_with = "unlock")]
        lock: bool,

        #[arg(long = "status", requires = "session", help = "Show whether the session has unlocked the page")]
        status: bool,
    },

    /// Resolve the date window a report would use
    Range {
        #[arg(value_enum)]
        report: ReportKind,

        #[arg(long = "start", value_name = "YYYY-MM-DD")]
        start: Option<String>,

        #[arg(long = "end", value_name = "YYYY-MM-DD")]
        end: Option<String>,

        /// Anchor date used instead of the local date
        #[arg(long = "today", value_name = "YYYY-MM-DD", hide = true)]
        today: Option<String>,
    },
}
