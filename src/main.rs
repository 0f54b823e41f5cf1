//! synonyms binary entry point.
//!
//! Parses the command line, sets up logging, runs one dictionary command
//! and maps failures to an exit status.
//!
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use synonym_store::config::Settings;
use synonym_store::search::search;
use synonym_store::{Record, SynonymError, SynonymStore};

#[derive(Parser)]
#[command(name = "synonyms")]
#[command(author, version, about = "Look up and edit a flat-file synonym dictionary", long_about = None)]
struct Cli {
    /// Dictionary file (`word | syn, syn` per line)
    #[arg(short, long, global = true, env = "SYNONYMS_FILE")]
    dictionary: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the line for a word
    Show { word: String },

    /// Print every line
    List,

    /// Print lines whose word or synonyms contain a substring
    Search { query: String },

    /// Append a line such as "dog | puppy, hound"
    Add { line: String },

    /// Remove the line for a word
    Remove { word: String },

    /// Append a synonym to a word's line
    AddSynonym { word: String, synonym: String },

    /// Remove a synonym from a word's line
    RemoveSynonym { word: String, synonym: String },

    /// Sort words and their synonyms, then save
    Sort,

    /// Write a settings template
    InitConfig {
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool, settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { settings.log_level() })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Program entry point: run one command and report any error to stderr.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(cli.verbose, &settings);
    for key in &settings.ignored_keys {
        tracing::warn!("ignoring unknown config key {key}");
    }

    match run(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<SynonymError>()
                .map_or(1, SynonymError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    Settings::resolve(explicit).with_context(|| match explicit {
        Some(p) => format!("read config {}", p.display()),
        None => "read config".to_string(),
    })
}

fn run(cli: Cli, settings: &Settings) -> anyhow::Result<()> {
    let path = settings.dictionary_path(cli.dictionary.as_deref());

    match cli.command {
        Command::Show { word } => {
            let store = SynonymStore::load(&path)?;
            println!("{}", store.get_line(&word)?);
        }
        Command::List => {
            for record in &SynonymStore::load(&path)? {
                println!("{record}");
            }
        }
        Command::Search { query } => {
            let store = SynonymStore::load(&path)?;
            for record in search(&store, &query) {
                println!("{record}");
            }
        }
        Command::Add { line } => {
            let record: Record = line.parse()?;
            let mut store = load_or_empty(&path)?;
            if store.contains(record.word()) {
                bail!("{} already present in {}", record.word(), path.display());
            }
            store.add_record(record);
            save(&mut store, &path, settings)?;
        }
        Command::Remove { word } => {
            let mut store = SynonymStore::load(&path)?;
            store.remove_record(&word)?;
            save(&mut store, &path, settings)?;
        }
        Command::AddSynonym { word, synonym } => {
            let mut store = SynonymStore::load(&path)?;
            store.add_synonym(&word, &synonym)?;
            save(&mut store, &path, settings)?;
        }
        Command::RemoveSynonym { word, synonym } => {
            let mut store = SynonymStore::load(&path)?;
            store.remove_synonym(&word, &synonym)?;
            save(&mut store, &path, settings)?;
        }
        Command::Sort => {
            let mut store = SynonymStore::load(&path)?;
            store.sort();
            store.save(&path)?;
        }
        Command::InitConfig { path: out, force } => {
            if out.exists() && !force {
                bail!("{} exists, pass --force to overwrite", out.display());
            }
            settings
                .write_file(&out)
                .with_context(|| format!("write config {}", out.display()))?;
            tracing::info!("wrote {}", out.display());
        }
    }
    Ok(())
}

/// A missing dictionary starts out empty; any other read failure is an error.
fn load_or_empty(path: &Path) -> synonym_store::Result<SynonymStore> {
    if path.exists() {
        SynonymStore::load(path)
    } else {
        tracing::info!("{} does not exist, starting a new dictionary", path.display());
        Ok(SynonymStore::new())
    }
}

fn save(store: &mut SynonymStore, path: &Path, settings: &Settings) -> synonym_store::Result<()> {
    if settings.sort_on_save {
        store.sort();
    }
    store.save(path)
}
