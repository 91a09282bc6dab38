use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hours-normalizer - turn free-text office and teaching hours into weekly time slots
#[derive(Debug, Parser)]
#[command(name = "hours-normalizer")]
#[command(
    about = "Turn free-text office and teaching hours into weekly time slots",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse one free-text time range
    Parse {
        /// Text such as "Office hours 1-3 PM"
        text: String,
    },

    /// Order day names Monday to Friday, dropping weekends
    Days {
        days: Vec<String>,
    },

    /// Build time slots from days and a schedule
    Slots {
        /// Schedule text; may list several "Day: range" segments
        #[arg(long)]
        time: String,

        /// Day the schedule applies to (repeatable)
        #[arg(long = "day")]
        days: Vec<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        comments: Option<String>,
    },

    /// Classify completeness of extracted hours text
    Status {
        #[arg(long)]
        office_time: Option<String>,

        #[arg(long)]
        office_location: Option<String>,

        #[arg(long)]
        teaching_time: Option<String>,

        #[arg(long)]
        teaching_location: Option<String>,
    },

    /// Normalize a JSON array of raw extractions
    Batch {
        /// Input file
        file: PathBuf,

        /// Recompute statuses from slot counts after building
        #[arg(long)]
        revalidate: bool,
    },
}
