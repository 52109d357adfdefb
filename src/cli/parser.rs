use crate::export::ExportFormat;
use crate::models::{Frequency, Priority, Status};
use clap::{Parser, Subcommand};

/// Command-line interface definition for hotelmaint
/// CLI application to track hotel maintenance on a workbook file
#[derive(Parser)]
#[command(
    name = "hotelmaint",
    version = env!("CARGO_PKG_VERSION"),
    about = "Hotel maintenance tracker: work orders and recurring preventive tasks on a workbook file",
    long_about = None
)]
pub struct Cli {
    /// Override workbook path (useful for tests or a custom workbook)
    #[arg(global = true, long = "workbook")]
    pub workbook: Option<String>,

    /// Run in test mode (configuration file neither read nor written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the workbook
    Init,

    /// View or change configuration values
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "get", value_name = "KEY", help = "Print one configuration value")]
        get: Option<String>,

        #[arg(
            long = "set",
            num_args = 2,
            value_names = ["KEY", "VALUE"],
            help = "Set one configuration value"
        )]
        set: Option<Vec<String>>,
    },

    /// Manage work orders
    Order {
        #[command(subcommand)]
        action: OrderCommand,
    },

    /// Manage recurring preventive tasks
    Preventive {
        #[command(subcommand)]
        action: PreventiveCommand,
    },

    /// Generate work orders for every preventive task that is due
    Sweep {
        #[arg(long = "date", help = "Run as if today were this date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    /// Suggest a checklist for a preventive task
    Suggest {
        #[arg(long)]
        sector: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        description: String,
    },

    /// Show work order statistics
    Stats {
        #[arg(long, help = "Print the statistics as JSON")]
        json: bool,
    },

    /// Export every work order
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (default: timestamped name)")]
        file: Option<String>,

        #[arg(long, help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Check the workbook structure
    Diagnose {
        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Open a new work order
    Add {
        #[arg(long)]
        sector: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        description: String,

        #[arg(long, value_enum)]
        priority: Option<Priority>,

        #[arg(long, default_value = "")]
        requester: String,

        #[arg(long = "photo", value_name = "FILE", help = "Photo of the damage to store")]
        photo: Option<String>,

        #[arg(long = "photo-url", help = "Url of an already stored photo")]
        photo_url: Option<String>,

        #[arg(long = "item", help = "Checklist item (repeatable)")]
        items: Vec<String>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Update an existing work order
    Update {
        id: String,

        #[arg(long, value_enum)]
        status: Option<Status>,

        #[arg(long)]
        technician: Option<String>,

        #[arg(long = "repair", help = "What was done (saved when status is done)")]
        repair: Option<String>,

        #[arg(long)]
        materials: Option<String>,

        #[arg(long, help = "Hours spent (saved when status is done)")]
        hours: Option<f64>,

        #[arg(long, help = "Cost (saved when status is done)")]
        cost: Option<f64>,

        #[arg(long = "photo", value_name = "FILE", help = "Photo of the completed repair")]
        photo: Option<String>,

        #[arg(long = "photo-url")]
        photo_url: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Open and in-progress orders, most urgent first
    Pending {
        #[arg(long)]
        json: bool,
    },

    /// Done and cancelled orders, most recently closed first
    History {
        #[arg(long)]
        json: bool,
    },

    /// Every order in sheet order
    All {
        #[arg(long)]
        json: bool,
    },

    /// Show one order
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum PreventiveCommand {
    /// Schedule a new preventive task
    Add {
        #[arg(long)]
        sector: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        description: String,

        #[arg(long, value_enum)]
        priority: Option<Priority>,

        #[arg(long, value_enum, default_value_t = Frequency::Monthly)]
        frequency: Frequency,

        #[arg(long = "start", help = "First reference date (YYYY-MM-DD or dd/MM/yyyy)")]
        start: Option<String>,

        #[arg(long = "item", help = "Checklist template item (repeatable)")]
        items: Vec<String>,

        #[arg(
            long = "suggest",
            help = "Fill the checklist template with a suggestion when no item is given"
        )]
        suggest: bool,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List preventive tasks (active only by default)
    List {
        #[arg(long, help = "Include inactive tasks")]
        all: bool,

        #[arg(long)]
        json: bool,
    },

    /// Show one task
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Deactivate a task (it is never deleted)
    Deactivate { id: String },

    /// Generate a work order for a task right now
    Generate { id: String },
}
