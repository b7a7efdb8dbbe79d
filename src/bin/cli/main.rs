mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use engram::library::LibraryStorage;

#[derive(Parser)]
#[command(name = "engram-cli", about = "Text memorization trainer", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Folder management
    #[command(subcommand)]
    Folder(FolderCommand),

    /// Card management
    #[command(subcommand)]
    Card(CardCommand),

    /// Show band counts, folder averages and the urgency list
    Dashboard,

    /// Run an interactive training session for a card
    Train {
        /// Card id (see `card list`)
        id: i64,
    },

    /// Export the whole document to a backup file
    Export {
        /// Destination path
        path: PathBuf,
    },

    /// Replace the whole document from a backup file
    Import {
        /// Backup file to read
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum FolderCommand {
    /// Create a folder
    Add { name: String },
    /// Rename a folder
    Rename { name: String, new_name: String },
    /// Delete a folder and every card it owns
    Rm { name: String },
    /// List folders with card counts
    List,
}

#[derive(Subcommand)]
enum CardCommand {
    /// Create a card in a folder
    Add {
        folder: String,
        title: String,
        /// Card text (use "-" to read from stdin)
        #[arg(long)]
        text: String,
    },
    /// Edit a card's title and text
    Edit {
        id: i64,
        title: String,
        /// New text (use "-" to read from stdin)
        #[arg(long)]
        text: String,
    },
    /// Delete a card
    Rm { id: i64 },
    /// Show a card with its current decay reading
    Show { id: i64 },
    /// List cards in a folder with decayed levels
    List { folder: String },
}

/// Resolve "-" as stdin
fn resolve_text(text: String) -> Result<String> {
    if text == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
            .context("Failed to read card text from stdin")?;
        Ok(buf)
    } else {
        Ok(text)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => LibraryStorage::default_data_dir().context("Failed to get data directory")?,
    };
    let storage = LibraryStorage::new(data_dir);
    storage.init().context("Failed to initialize storage")?;

    match cli.command {
        Command::Folder(subcmd) => match subcmd {
            FolderCommand::Add { name } => commands::folder_add(&storage, &name)?,
            FolderCommand::Rename { name, new_name } => {
                commands::folder_rename(&storage, &name, &new_name)?
            }
            FolderCommand::Rm { name } => commands::folder_rm(&storage, &name)?,
            FolderCommand::List => commands::folder_list(&storage)?,
        },
        Command::Card(subcmd) => match subcmd {
            CardCommand::Add { folder, title, text } => {
                let text = resolve_text(text)?;
                commands::card_add(&storage, &folder, &title, &text)?;
            }
            CardCommand::Edit { id, title, text } => {
                let text = resolve_text(text)?;
                commands::card_edit(&storage, id, &title, &text)?;
            }
            CardCommand::Rm { id } => commands::card_rm(&storage, id)?,
            CardCommand::Show { id } => commands::card_show(&storage, id)?,
            CardCommand::List { folder } => commands::card_list(&storage, &folder)?,
        },
        Command::Dashboard => commands::dashboard(&storage)?,
        Command::Train { id } => commands::train(&storage, id)?,
        Command::Export { path } => commands::export(&storage, &path)?,
        Command::Import { path } => commands::import(&storage, &path)?,
    }

    Ok(())
}
