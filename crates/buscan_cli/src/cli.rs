//! Command-line surface for the fleet core.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "buscan")]
#[command(about = "Manage buses, routes and fleet inventory stored in one data file.")]
pub struct CommandLine {
    /// Data file holding buses, routes and fleet items.
    #[arg(long, global = true, default_value = "data.json")]
    pub data: PathBuf,
    /// JSON file with bus states and reference policy.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory for rolling log files. Logging is off when omitted.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage individually tracked buses
    #[command(subcommand)]
    Bus(BusCommand),
    /// Manage routes and their stop sequences
    #[command(subcommand)]
    Route(RouteCommand),
    /// Manage fleet inventory
    #[command(subcommand)]
    Fleet(FleetCommand),
    /// Report assignments pointing at deleted routes
    Check,
    /// Print the core version
    Version,
}

#[derive(Subcommand)]
pub enum BusCommand {
    /// Register a new bus
    Add {
        number: String,
        #[arg(long, default_value_t = 40, allow_negative_numbers = true)]
        capacity: i64,
        #[arg(long)]
        route: Option<String>,
    },
    /// Change capacity, state or route of a bus
    Update {
        number: String,
        #[arg(long, allow_negative_numbers = true)]
        capacity: Option<i64>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long, conflicts_with = "clear_route")]
        route: Option<String>,
        /// Remove the route assignment
        #[arg(long)]
        clear_route: bool,
    },
    /// Remove a bus
    Delete { number: String },
    /// List buses
    List,
}

#[derive(Subcommand)]
pub enum RouteCommand {
    /// Create a route; stops may be added later
    Add {
        name: String,
        /// Stop name, repeatable, in travel order
        #[arg(long = "stop")]
        stops: Vec<String>,
    },
    /// Replace the stops of a route, optionally renaming it
    Update {
        name: String,
        #[arg(long = "rename")]
        new_name: Option<String>,
        /// Stop name, repeatable, in travel order
        #[arg(long = "stop", required = true)]
        stops: Vec<String>,
    },
    /// Remove a route; assignments to it are kept
    Delete { name: String },
    /// List routes with stop counts
    List,
    /// Print the stops of one route in order
    Show { name: String },
    /// Edit one stop of a route
    #[command(subcommand)]
    Stop(StopCommand),
}

#[derive(Subcommand)]
pub enum StopCommand {
    /// Insert a stop, at the end unless --at is given
    Insert {
        route: String,
        stop: String,
        #[arg(long, allow_negative_numbers = true)]
        at: Option<i64>,
    },
    /// Remove the stop at a zero-based index
    Remove { route: String, index: usize },
    /// Move the stop at a zero-based index one step
    Move {
        route: String,
        index: usize,
        #[arg(value_enum)]
        direction: DirectionArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

#[derive(Subcommand)]
pub enum FleetCommand {
    /// Create or update a fleet item
    Save(FleetSaveArgs),
    /// Remove a fleet item
    Delete { name: String },
    /// List fleet items
    List,
}

#[derive(Args)]
pub struct FleetSaveArgs {
    pub name: String,
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: i64,
    #[arg(long, allow_negative_numbers = true)]
    pub capacity: i64,
    #[arg(long)]
    pub route: Option<String>,
    /// Current name when renaming an existing item
    #[arg(long)]
    pub previous_name: Option<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
