use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use focuscore::cli::args::{Cli, Commands};
use focuscore::cli::commands;
use focuscore::config::{ColorSetting, Config, Paths};
use focuscore::features::focus::{CompletionCue, FocusController, SilentCue, TerminalBell};
use focuscore::storage::Database;
use focuscore::tasks::{TaskProvider, TaskStore, TaskView};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(root) => Paths::with_root(root),
        None => Paths::new()?,
    };
    paths.ensure_dirs()?;

    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("loading {}", paths.config_file.display()))?;
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {},
    }
    let format = cli.output.unwrap_or(config.general.default_output);

    let db = Database::open_at(&paths.database)
        .with_context(|| format!("opening {}", paths.database.display()))?;
    let provider = TaskProvider::new(TaskStore::load_with_key(Box::new(db), &config.storage.key));
    let handle = provider.handle();

    let cue: Box<dyn CompletionCue> = if config.focus.completion_sound {
        Box::new(TerminalBell)
    } else {
        Box::new(SilentCue)
    };
    let mut controller = FocusController::new(cue)
        .with_session_length(config.focus.session_secs())
        .with_queue_size(config.focus.queue_size);

    let result = match cli.command {
        Commands::Add(args) => commands::quick_add(&handle, args, format),
        Commands::Agenda => commands::view(&handle, TaskView::Agenda, format),
        Commands::Overdue => commands::view(&handle, TaskView::Overdue, format),
        Commands::List => commands::view(&handle, TaskView::AllTasks, format),
        Commands::Upcoming => commands::upcoming(&handle, format),
        Commands::Dashboard => commands::dashboard(&handle, format),
        Commands::Stats => commands::stats(&handle, format),
        Commands::Show { id } => commands::show(&handle, &id, format),
        Commands::Toggle { id } => commands::toggle(&handle, &id, format),
        Commands::Delete { id } => commands::delete(&handle, &id, format),
        Commands::Edit(args) => commands::edit(&handle, args, format),
        Commands::Focus(args) => commands::focus(&handle, &mut controller, args.command, format),
    };

    controller.teardown();
    provider.teardown();

    let output = result?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
