//! Command-line front end for the notebook.
//!
//! # Responsibility
//! - Parse arguments, build the config and open the `Notebook` root.
//! - Translate subcommands into add/delete intents or read-only views.

use clap::{Parser, Subcommand};
use log::warn;
use notebook_core::{
    color_display_name, core_version, format_local_date, init_logging, FormField, IntentOutcome,
    Notebook, NotebookConfig, NoteColor, NoteId, StorageMode,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Color-grouped notes persisted to a local database.
#[derive(Parser)]
#[command(name = "notebook", version = core_version())]
struct Cli {
    /// Directory holding the notes database and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a note
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long, default_value = NoteColor::DEFAULT.tag())]
        color: String,
    },
    /// Delete the note with the given id
    Delete { id: NoteId },
    /// Print notes grouped by color, newest first
    List,
    /// Write the rendered notes page as HTML
    Render {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the known color tags
    Colors,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match cli.data_dir {
        Some(dir) => NotebookConfig::with_data_dir(absolutize(dir)),
        None => match NotebookConfig::from_project_dirs() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}; pass --data-dir");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    if let Err(err) = init_logging(&config.log_level, &config.log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut notebook = match Notebook::open(&config) {
        Ok(notebook) => notebook,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if notebook.storage_mode() == StorageMode::MemoryFallback {
        warn!("event=cli_start module=cli status=degraded storage_mode=memory");
        eprintln!("warning: database unavailable, changes will not be saved");
    }

    match cli.command {
        Command::Add { title, text, color } => add(&mut notebook, &title, &text, &color),
        Command::Delete { id } => delete(&mut notebook, id),
        Command::List => {
            list(&notebook);
            ExitCode::SUCCESS
        }
        Command::Render { out } => render(&notebook, out),
        Command::Colors => {
            for color in NoteColor::ALL {
                println!("{:<12} {}", color.tag(), color.display_name());
            }
            ExitCode::SUCCESS
        }
    }
}

fn add(notebook: &mut Notebook, title: &str, text: &str, color: &str) -> ExitCode {
    match notebook.add_note(title, text, color) {
        Some(IntentOutcome::Added(note)) => {
            println!("added note {} to {}", note.id, color_display_name(&note.color));
            ExitCode::SUCCESS
        }
        _ => {
            if notebook.hint_visible(FormField::Title) {
                eprintln!("error: title is required");
            }
            if notebook.hint_visible(FormField::Text) {
                eprintln!("error: text is required");
            }
            ExitCode::FAILURE
        }
    }
}

fn delete(notebook: &mut Notebook, id: NoteId) -> ExitCode {
    match notebook.delete_note(id) {
        Some(IntentOutcome::Removed { existed: true, .. }) => println!("deleted note {id}"),
        _ => println!("no note with id {id}"),
    }
    ExitCode::SUCCESS
}

fn list(notebook: &Notebook) {
    let grouped = notebook.grouped();
    if grouped.is_empty() {
        println!("There are no notes added yet.");
        return;
    }
    for (color, notes) in &grouped {
        println!("{}", color_display_name(color));
        for note in notes {
            println!(
                "  [{}] {}  {}",
                note.id,
                format_local_date(&note.date),
                note.title
            );
            for line in note.text.lines() {
                println!("      {line}");
            }
        }
    }
}

fn render(notebook: &Notebook, out: Option<PathBuf>) -> ExitCode {
    let document = notebook.document();
    match out {
        Some(path) => match std::fs::write(&path, document) {
            Ok(()) => {
                println!("wrote {}", path.display());
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: cannot write `{}`: {err}", path.display());
                ExitCode::FAILURE
            }
        },
        None => {
            print!("{document}");
            ExitCode::SUCCESS
        }
    }
}

fn absolutize(dir: PathBuf) -> PathBuf {
    if dir.is_absolute() {
        return dir;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&dir))
        .unwrap_or(dir)
}
