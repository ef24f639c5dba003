//! Clap derive structures for the `statusdeck` CLI.
//!
//! Defines the command tree, global flags and the value enums the handlers
//! translate into core types. This file is also compiled by `build.rs`, so
//! it may only depend on `clap` and `clap_complete`.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// statusdeck -- operate a status page from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "statusdeck",
    version,
    about = "Operate a status page from the command line",
    long_about = "Manage services, service groups, incidents and maintenance windows\n\
        on a status-page backend, and render the public status summary.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "STATUSDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "STATUSDECK_SERVER", global = true)]
    pub server: Option<String>,

    /// Bearer token (overrides profile and keyring)
    #[arg(long, env = "STATUSDECK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Name recorded on incident and maintenance updates
    #[arg(long, env = "STATUSDECK_AUTHOR", global = true)]
    pub author: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STATUSDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "STATUSDECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "STATUSDECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Color if stdout is a terminal and NO_COLOR is unset
    Auto,
    Always,
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ServiceStatusArg {
    Operational,
    Maintenance,
    #[value(alias = "degraded")]
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum IncidentStatusArg {
    Investigating,
    Identified,
    Monitoring,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum MaintenanceStatusArg {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityArg {
    Minor,
    Major,
    Critical,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the public status summary
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Manage monitored services
    #[command(alias = "svc")]
    Services(ServicesArgs),

    /// Manage service groups
    #[command(alias = "grp")]
    Groups(GroupsArgs),

    /// Manage incidents and their update timelines
    #[command(alias = "inc")]
    Incidents(IncidentsArgs),

    /// Manage scheduled maintenance
    #[command(alias = "mnt")]
    Maintenance(MaintenanceArgs),

    /// Show the authenticated user
    Whoami,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Argument Structs ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Only show entries whose name contains this text (case-insensitive)
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Show at most this many entries
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STATUS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Keep running and re-render whenever the backend data changes
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// Refresh interval in seconds for --watch (overrides config)
    #[arg(long, requires = "watch")]
    pub interval: Option<u64>,

    /// Include resolved incidents and finished maintenance
    #[arg(long)]
    pub history: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Only show services in this status
        #[arg(long, value_enum)]
        status: Option<ServiceStatusArg>,

        /// Only show members of this group (id or name)
        #[arg(long)]
        group: Option<String>,
    },

    /// Show one service
    Get {
        /// Service id or name
        service: String,
    },

    /// Create a service
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, value_enum, default_value = "operational")]
        status: ServiceStatusArg,

        /// Group id or name
        #[arg(long)]
        group: Option<String>,

        /// Uptime percentage (0-100)
        #[arg(long)]
        uptime: Option<f64>,
    },

    /// Update a service's fields
    Update {
        /// Service id or name
        service: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_enum)]
        status: Option<ServiceStatusArg>,

        /// Move into this group (id or name)
        #[arg(long, conflicts_with = "no_group")]
        group: Option<String>,

        /// Remove the service from its group
        #[arg(long)]
        no_group: bool,

        /// Uptime percentage (0-100)
        #[arg(long)]
        uptime: Option<f64>,
    },

    /// Set a service's status
    SetStatus {
        /// Service id or name
        service: String,

        #[arg(value_enum)]
        status: ServiceStatusArg,
    },

    /// Delete a service
    #[command(alias = "rm")]
    Delete {
        /// Service id or name
        service: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GROUPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List groups with their aggregated status
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one group and its member services
    Get {
        /// Group id or name
        group: String,
    },

    /// Create a group
    Create {
        #[arg(long)]
        name: String,

        /// Member services (id or name), repeatable
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,
    },

    /// Rename a group or replace its members
    Update {
        /// Group id or name
        group: String,

        #[arg(long)]
        name: Option<String>,

        /// New member list (id or name), repeatable
        #[arg(long = "service", value_name = "SERVICE", conflicts_with = "clear")]
        services: Vec<String>,

        /// Remove every member
        #[arg(long)]
        clear: bool,
    },

    /// Delete a group (its services become ungrouped)
    #[command(alias = "rm")]
    Delete {
        /// Group id or name
        group: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INCIDENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct IncidentsArgs {
    #[command(subcommand)]
    pub command: IncidentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum IncidentsCommand {
    /// List incidents (active only unless --all)
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Include resolved incidents
        #[arg(long, short = 'a')]
        all: bool,
    },

    /// Show one incident
    Get { id: String },

    /// Show an incident's update timeline
    #[command(alias = "log")]
    Timeline { id: String },

    /// Open an incident
    Create {
        #[arg(long)]
        title: String,

        /// Description, also used as the first update's message
        #[arg(long, short = 'm')]
        message: String,

        #[arg(long, value_enum, default_value = "investigating")]
        status: IncidentStatusArg,

        #[arg(long, value_enum, default_value = "minor")]
        severity: SeverityArg,

        /// Affected service (id or name), repeatable
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,
    },

    /// Post an update to an incident's timeline
    Update {
        id: String,

        #[arg(long, short = 'm')]
        message: String,

        /// New status (defaults to the current one)
        #[arg(long, value_enum)]
        status: Option<IncidentStatusArg>,
    },

    /// Resolve an incident
    Resolve {
        id: String,

        #[arg(long, short = 'm', default_value = "This incident has been resolved.")]
        message: String,
    },

    /// Change an incident's title, description, severity or services
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, value_enum)]
        severity: Option<SeverityArg>,

        /// Replace the affected services (id or name), repeatable
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,
    },

    /// Delete an incident
    #[command(alias = "rm")]
    Delete { id: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MAINTENANCE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    pub command: MaintenanceCommand,
}

#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// List maintenance (open only unless --all)
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Include completed and cancelled maintenance
        #[arg(long, short = 'a')]
        all: bool,
    },

    /// Show one maintenance event
    Get { id: String },

    /// Show a maintenance event's update timeline
    #[command(alias = "log")]
    Timeline { id: String },

    /// Schedule maintenance
    Create {
        #[arg(long)]
        title: String,

        /// Description, also used as the first update's message
        #[arg(long, short = 'm')]
        message: String,

        /// Window start (RFC 3339, e.g. 2026-11-01T02:00:00Z)
        #[arg(long)]
        start: String,

        /// Window end (RFC 3339)
        #[arg(long)]
        end: String,

        /// Affected service (id or name), repeatable
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,
    },

    /// Post an update to a maintenance timeline
    Update {
        id: String,

        #[arg(long, short = 'm')]
        message: String,

        /// New status (defaults to the current one)
        #[arg(long, value_enum)]
        status: Option<MaintenanceStatusArg>,
    },

    /// Mark maintenance as in progress
    Start {
        id: String,

        #[arg(long, short = 'm', default_value = "Maintenance is in progress.")]
        message: String,
    },

    /// Mark maintenance as completed
    Complete {
        id: String,

        #[arg(long, short = 'm', default_value = "Maintenance has been completed.")]
        message: String,
    },

    /// Cancel scheduled maintenance
    Cancel {
        id: String,

        #[arg(long, short = 'm', default_value = "Maintenance has been cancelled.")]
        message: String,
    },

    /// Change title, description, services or window
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Replace the affected services (id or name), repeatable
        #[arg(long = "service", value_name = "SERVICE")]
        services: Vec<String>,

        /// New window start (RFC 3339); requires --end
        #[arg(long, requires = "end")]
        start: Option<String>,

        /// New window end (RFC 3339); requires --start
        #[arg(long, requires = "start")]
        end: Option<String>,
    },

    /// Delete a maintenance event
    #[command(alias = "rm")]
    Delete { id: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the current configuration (secrets masked)
    Show,

    /// Set a key on the active profile
    Set {
        /// server, auth_mode, token_env, email, author, ca_cert, insecure, timeout
        key: String,
        value: String,
    },

    /// List profiles (* marks the default)
    Profiles,

    /// Make a profile the default
    Use { name: String },

    /// Store a token or password in the system keyring
    SetSecret {
        #[arg(value_enum, default_value = "token")]
        kind: SecretKindArg,

        /// Profile to store it for (defaults to the active profile)
        #[arg(long = "for", value_name = "PROFILE")]
        target: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SecretKindArg {
    Token,
    Password,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
