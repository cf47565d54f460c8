use std::path::PathBuf;

use branch_engine::Frequency;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "branch",
    version,
    about = "Manage the branch website's events, menu, roster, announcements and rentals"
)]
pub struct Cli {
    /// Config file (defaults to ./branch.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Data directory, overriding store.path
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calendar events
    #[command(subcommand)]
    Events(EventsCommand),
    /// Canteen menu
    #[command(subcommand)]
    Menu(MenuCommand),
    /// Executive roster
    #[command(subcommand)]
    Executives(ExecutivesCommand),
    /// Site-wide announcements
    #[command(subcommand)]
    Announcements(AnnouncementsCommand),
    /// Rental rooms
    #[command(subcommand)]
    Rooms(RoomsCommand),
    /// Event posters
    #[command(subcommand)]
    Posters(PostersCommand),
}

#[derive(Subcommand)]
pub enum EventsCommand {
    /// Create an event, or a repeating series of events
    Add(AddEvent),
    /// List every event by date
    List,
    /// Events on one calendar day
    On {
        /// YYYY-MM-DD (defaults to today)
        date: Option<String>,
    },
    /// Days in a month that have events
    Month {
        /// YYYY-MM
        month: String,
    },
    /// Delete one event
    Delete { id: String },
}

#[derive(Args)]
pub struct AddEvent {
    #[arg(long)]
    pub title: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// HH:MM
    #[arg(long)]
    pub start: String,
    /// HH:MM
    #[arg(long, conflicts_with = "until_close")]
    pub end: Option<String>,
    /// The event runs until closing
    #[arg(long)]
    pub until_close: bool,
    #[arg(long)]
    pub description: String,
    /// weekly, biweekly or monthly
    #[arg(long, requires = "until")]
    pub repeat: Option<Frequency>,
    /// Last day of the repetition, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "repeat")]
    pub until: Option<String>,
    /// Skip the confirmation for large batches
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum MenuCommand {
    /// Add a menu item
    Add {
        #[arg(long)]
        name: String,
        /// e.g. 12.50 or $12.50
        #[arg(long)]
        price: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List the menu grouped by category
    List,
    /// Delete one menu item
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ExecutivesCommand {
    /// Add a roster entry
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "")]
        responsibility: String,
        /// Display position (defaults to the end of the roster)
        #[arg(long)]
        order: Option<u32>,
    },
    /// List the roster in display order
    List,
    /// Populate an empty roster with the default executives
    Seed,
    /// Delete one roster entry
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum AnnouncementsCommand {
    /// Post an announcement
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
        #[arg(long, default_value = "")]
        link: String,
        /// YYYY-MM-DD
        #[arg(long)]
        end_date: String,
        /// HH:MM (defaults to 23:59)
        #[arg(long, default_value = "")]
        end_time: String,
    },
    /// List announcements, newest first
    List {
        /// Only those not yet expired
        #[arg(long)]
        active: bool,
    },
    /// Change an announcement; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        message: Option<String>,
        /// Empty string removes the link
        #[arg(long)]
        link: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        end_date: Option<String>,
        /// HH:MM
        #[arg(long)]
        end_time: Option<String>,
    },
    /// Delete one announcement
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum RoomsCommand {
    /// Add a rental room
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        cost: String,
        #[arg(long)]
        order: Option<u32>,
        /// Image path or URL
        #[arg(long)]
        image: Option<String>,
    },
    /// List rooms in display order
    List,
    /// Change a room; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        cost: Option<String>,
        #[arg(long)]
        order: Option<u32>,
        /// Image path or URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete one room
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum PostersCommand {
    /// Add an event poster
    Add {
        /// Image path or URL
        #[arg(long)]
        image: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long)]
        order: Option<u32>,
    },
    /// List posters in display order
    List,
    /// Change a poster; omitted fields keep their current value
    Edit {
        id: String,
        /// Image path or URL
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        order: Option<u32>,
    },
    /// Delete one poster
    Delete { id: String },
}
