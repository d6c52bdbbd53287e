use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::tasks::Priority;

#[derive(Parser)]
#[command(name = "focuscore")]
#[command(about = "Deadline-driven task planner with a single-task focus timer")]
#[command(long_about = "focuscore - plan by deadline, work one task at a time

Tasks carry a deadline, a priority and tags. Views slice the collection by
urgency, and focus mode picks the single task to work on right now.

QUICK START:
  focuscore add \"ship notes tomorrow 5pm #docs !high\"
  focuscore agenda          Overdue and due-today tasks
  focuscore focus           What to work on now
  focuscore focus run       Interactive focus timer

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  focuscore <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output. Defaults to `general.default_output` from
    /// the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding config.yaml and focuscore.db
    #[arg(long, env = "FOCUSCORE_HOME", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task from one line of text
    ///
    /// Dates, tags, priority and notes are picked out of the text; what is
    /// left becomes the title. Flags override anything detected.
    ///
    /// # Examples
    ///
    ///   focuscore add "pay invoice tomorrow 5pm #finance !high"
    ///   focuscore add "renew passport by dec 15 // bring old photos"
    ///   focuscore add "Quarterly report" --deadline 2026-12-01 -p low
    ///
    /// # Supported Patterns
    ///
    ///   Dates:      today, tomorrow, next monday, dec 15, in 3 days
    ///   Times:      3pm, 15:00, morning, evening
    ///   Tags:       #tag1 #tag2
    ///   Priority:   !high, !!, !!!
    ///   Notes:      // notes at the end
    ///
    /// Without a date the deadline is the end of today.
    #[command(alias = "a")]
    Add(AddArgs),

    /// Pending tasks due today or already overdue, soonest first
    #[command(alias = "ag")]
    Agenda,

    /// Pending tasks past their deadline
    #[command(alias = "od")]
    Overdue,

    /// Every task, newest first
    #[command(alias = "ls")]
    List,

    /// Pending tasks that are not yet overdue, by deadline
    #[command(alias = "up")]
    Upcoming,

    /// Pending tasks grouped into overdue, today and later
    #[command(alias = "d")]
    Dashboard,

    /// Completion statistics
    Stats,

    /// Show one task
    Show {
        /// Task id
        id: String,
    },

    /// Flip a task between pending and completed
    ///
    /// An unknown id changes nothing.
    #[command(alias = "done")]
    Toggle {
        /// Task id
        id: String,
    },

    /// Delete a task permanently
    ///
    /// An unknown id changes nothing.
    #[command(alias = "rm")]
    Delete {
        /// Task id
        id: String,
    },

    /// Change fields of an existing task
    ///
    /// # Examples
    ///
    ///   focuscore edit 3f9a2c1d --title "Final draft"
    ///   focuscore edit 3f9a2c1d --deadline "friday 5pm" -p high
    ///   focuscore edit 3f9a2c1d --tag docs --tag review
    Edit(EditArgs),

    /// Focus mode
    ///
    /// Without a subcommand, shows the active task, what is queued after it
    /// and the timer.
    #[command(alias = "f")]
    Focus(FocusArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// The task in natural language
    pub text: String,

    /// Longer notes for the task
    #[arg(long)]
    pub description: Option<String>,

    /// Priority (high, medium, low)
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Deadline (RFC 3339 or natural language)
    #[arg(long, short = 'd')]
    pub deadline: Option<String>,

    /// Tag, repeatable
    #[arg(long = "tag", short = 't')]
    pub tags: Vec<String>,

    /// Only parse and show what would be created
    #[arg(long)]
    pub parse_only: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,

    /// New priority (high, medium, low)
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// New deadline (RFC 3339 or natural language)
    #[arg(long, short = 'd')]
    pub deadline: Option<String>,

    /// Replace tags, repeatable
    #[arg(long = "tag", short = 't')]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct FocusArgs {
    #[command(subcommand)]
    pub command: Option<FocusCommands>,
}

#[derive(Subcommand)]
pub enum FocusCommands {
    /// Show the active task and queue
    Status,

    /// Mark the active task completed
    ///
    /// The next task in focus order becomes active.
    Complete,

    /// Open the interactive focus timer
    ///
    /// Keys: space start/pause, c complete, q quit.
    Run,
}
