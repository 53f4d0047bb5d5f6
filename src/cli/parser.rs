use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for sitelogger
/// CLI application to track construction-site attendance with SQLite
#[derive(Parser)]
#[command(
    name = "sitelogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Construction-site attendance CLI: geofenced check-ins, wages, productivity losses and site budget balance",
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

/// Check-in payload shared by `entry`, `exit` and `mark`.
#[derive(Args, Debug, Clone)]
pub struct CheckInArgs {
    #[arg(long = "lat", allow_hyphen_values = true, help = "Latitude in decimal degrees")]
    pub lat: Option<String>,

    #[arg(long = "lon", allow_hyphen_values = true, help = "Longitude in decimal degrees")]
    pub lon: Option<String>,

    #[arg(long = "photo", help = "Reference to the check-in photo")]
    pub photo: Option<String>,

    #[arg(long = "ip", help = "Client IP address")]
    pub ip: Option<String>,

    #[arg(
        long = "at",
        value_name = "DATETIME",
        help = "Check-in instant (YYYY-MM-DD HH:MM[:SS]); defaults to now"
    )]
    pub at: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing configuration keys with default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register and list workers
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Register, list and (de)activate sites
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },

    /// Record a worker entering a site
    Entry {
        #[arg(long = "worker")]
        worker: i64,

        #[arg(long = "site")]
        site: i64,

        #[command(flatten)]
        check_in: CheckInArgs,
    },

    /// Record a worker leaving (closes their open record)
    Exit {
        #[arg(long = "worker")]
        worker: i64,

        #[arg(long = "record", help = "Close this record instead of the latest open one")]
        record: Option<i64>,

        #[command(flatten)]
        check_in: CheckInArgs,
    },

    /// Toggle entry/exit for the check-in day
    Mark {
        #[arg(long = "worker")]
        worker: i64,

        #[arg(long = "site")]
        site: i64,

        #[command(flatten)]
        check_in: CheckInArgs,
    },

    /// Correct entry and/or exit time of an attendance record
    Correct {
        /// Attendance record id
        record: i64,

        #[arg(long = "entry", help = "New entry time (HH:MM[:SS])")]
        entry: Option<String>,

        #[arg(long = "exit", help = "New exit time (HH:MM[:SS])")]
        exit: Option<String>,

        #[arg(long = "by", help = "Id of the supervisor or admin making the correction")]
        by: i64,
    },

    /// File and manage productivity-loss incident reports
    Incident {
        #[command(subcommand)]
        action: IncidentAction,
    },

    /// Show the budget balance of a site
    Balance {
        site: i64,

        #[arg(long = "json", help = "Print the full report as JSON")]
        json: bool,
    },

    /// Attendance of a site for one day
    Dashboard {
        site: i64,

        #[arg(long = "date", help = "Day to show (YYYY-MM-DD); defaults to today")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Register a worker
    Add {
        name: String,

        #[arg(long = "role", default_value = "worker", help = "admin | supervisor | worker")]
        role: String,

        #[arg(long = "daily", help = "Flat rate paid for a full day")]
        daily: String,

        #[arg(long = "hourly", help = "Rate paid per hour below a full day")]
        hourly: String,

        #[arg(long = "national-id")]
        national_id: Option<String>,

        #[arg(long = "phone")]
        phone: Option<String>,
    },

    /// List registered workers
    List,
}

#[derive(Subcommand)]
pub enum SiteAction {
    /// Register a site
    Add {
        name: String,

        #[arg(long = "lat", allow_hyphen_values = true)]
        lat: String,

        #[arg(long = "lon", allow_hyphen_values = true)]
        lon: String,

        #[arg(long = "radius", help = "Geofence radius in meters")]
        radius: Option<f64>,

        #[arg(long = "budget")]
        budget: String,

        #[arg(long = "penalty", default_value = "0", help = "Penalty per day of delay")]
        penalty: String,

        #[arg(long = "start", help = "Start date (YYYY-MM-DD)")]
        start: String,

        #[arg(long = "end", help = "Estimated end date (YYYY-MM-DD)")]
        end: String,

        #[arg(long = "address", default_value = "")]
        address: String,

        #[arg(long = "supervisor")]
        supervisor: Option<i64>,
    },

    /// List sites
    List {
        #[arg(long = "active", help = "Only active sites")]
        active: bool,

        #[arg(long = "supervisor", help = "Only active sites assigned to this supervisor")]
        supervisor: Option<i64>,
    },

    /// Reopen a site for check-ins
    Activate { id: i64 },

    /// Close a site for check-ins
    Deactivate { id: i64 },
}

#[derive(Subcommand)]
pub enum IncidentAction {
    /// File an incident report
    Add {
        #[arg(long = "site")]
        site: i64,

        #[arg(long = "by", help = "Id of the reporting supervisor")]
        by: i64,

        #[arg(long = "date", help = "Incident day (YYYY-MM-DD); defaults to today")]
        date: Option<String>,

        #[arg(long = "start", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "end", help = "End time (HH:MM)")]
        end: String,

        #[arg(long = "reason")]
        reason: String,

        #[arg(long = "workers", value_delimiter = ',', help = "Affected worker ids")]
        workers: Vec<i64>,

        #[arg(long = "delay", help = "Days of delay caused (one decimal)")]
        delay: Option<String>,
    },

    /// Change the workers affected by an incident
    Workers {
        id: i64,

        #[arg(long = "set", value_delimiter = ',', conflicts_with_all = ["add", "remove", "clear"])]
        set: Option<Vec<i64>>,

        #[arg(long = "add", value_delimiter = ',')]
        add: Vec<i64>,

        #[arg(long = "remove", value_delimiter = ',')]
        remove: Vec<i64>,

        #[arg(long = "clear", conflicts_with_all = ["add", "remove"])]
        clear: bool,
    },

    /// Acknowledge incident reports
    Read {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// List incident reports
    List {
        #[arg(long = "site")]
        site: Option<i64>,

        #[arg(long = "unread")]
        unread: bool,
    },
}
