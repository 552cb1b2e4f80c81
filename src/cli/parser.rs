use clap::{Parser, Subcommand};

/// Command-line interface definition for rtcal
/// Terminal calendar for Redmine time entries, with local absences
#[derive(Parser)]
#[command(
    name = "rtcal",
    version = env!("CARGO_PKG_VERSION"),
    about = "A terminal calendar for Redmine time entries, with local placeholders for vacation, sick days and holidays",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user instead of the configured `current_user`
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Select the user the calendar belongs to
    Login {
        /// Login name
        #[arg(value_name = "USER")]
        login: String,

        #[arg(long = "api-key", help = "Store this Redmine API key for the user")]
        api_key: Option<String>,
    },

    /// Forget the selected user
    Logout,

    /// Manage the Redmine API key of the current user
    Apikey {
        #[arg(long = "set", value_name = "KEY", help = "Store a new API key")]
        set: Option<String>,

        #[arg(long = "verify", help = "Check the key against /users/current.json")]
        verify: bool,

        #[arg(long = "clear", help = "Remove the stored API key")]
        clear: bool,
    },

    /// Show the month grid
    Calendar {
        #[arg(long = "month", value_name = "YYYY-MM", conflicts_with = "date")]
        month: Option<String>,

        #[arg(long = "date", value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(
            long = "interactive",
            short = 'i',
            help = "Navigate with p/n/t/d DATE/q"
        )]
        interactive: bool,
    },

    /// List the entries of one day
    Daily {
        /// Day to show (YYYY-MM-DD), today when omitted
        date: Option<String>,
    },

    /// Create, edit, delete or duplicate Redmine time entries
    Entry {
        #[command(subcommand)]
        action: EntryAction,
    },

    /// Manage local placeholders (Doctor, Vacation, Holiday, Sickday)
    Placeholder {
        #[command(subcommand)]
        action: PlaceholderAction,
    },

    /// List issues that can be booked on
    Issues {
        #[arg(long = "search", short = 's', help = "Filter by id or subject")]
        search: Option<String>,

        #[arg(long = "project", help = "Redmine project id or identifier")]
        project: Option<String>,
    },

    /// Manage your custom issue shortcuts
    CustomIssue {
        #[command(subcommand)]
        action: CustomIssueAction,
    },
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Book time on an issue
    Add {
        #[arg(long = "issue")]
        issue: u32,

        #[arg(long = "hours", default_value = "01:00", help = "e.g. 1.5 or 01:30")]
        hours: String,

        #[arg(long = "comment", short = 'm', default_value = "")]
        comment: String,

        #[arg(long = "date", help = "YYYY-MM-DD, today when omitted")]
        date: Option<String>,

        #[arg(long = "activity", help = "Activity id, configured default when omitted")]
        activity: Option<u32>,
    },

    /// Change fields of an existing entry
    Edit {
        id: u32,

        #[arg(long = "issue")]
        issue: Option<u32>,

        #[arg(long = "hours")]
        hours: Option<String>,

        #[arg(long = "comment", short = 'm')]
        comment: Option<String>,

        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "activity")]
        activity: Option<u32>,
    },

    /// Delete an entry
    Del {
        id: u32,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Copy an entry, optionally to another date
    Dup {
        id: u32,

        #[arg(long = "date")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PlaceholderAction {
    /// Add a placeholder
    Add {
        /// Doctor, Vacation, Holiday or Sickday
        kind: String,

        #[arg(long = "date", help = "YYYY-MM-DD, today when omitted")]
        date: Option<String>,

        #[arg(long = "hours", help = "Defaults: Doctor 4h, others 8h")]
        hours: Option<String>,

        #[arg(long = "note")]
        note: Option<String>,
    },

    /// Change a placeholder
    Edit {
        /// Placeholder id (a unique prefix is enough)
        id: String,

        #[arg(long = "kind")]
        kind: Option<String>,

        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "hours")]
        hours: Option<String>,

        #[arg(long = "note")]
        note: Option<String>,
    },

    /// Delete a placeholder
    Del {
        /// Placeholder id (a unique prefix is enough)
        id: String,
    },

    /// List placeholders of a month
    List {
        #[arg(long = "month", value_name = "YYYY-MM")]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CustomIssueAction {
    /// Add an issue to your list
    Add {
        issue_id: u32,

        /// Text shown in the issue list
        subject: String,
    },

    /// Remove an issue from your list
    Del { issue_id: u32 },

    /// Show your custom issues
    List,
}
