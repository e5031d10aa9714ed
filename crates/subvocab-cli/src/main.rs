//! Subvocab CLI
//!
//! Import subtitle files and study their vocabulary from the terminal.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use clap::{Parser, Subcommand};
use colored::{Color, Colorize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use subvocab_core::{
    Collection, DetailsView, DictionaryApiClient, Feedback, NextWord, ReviewScheduler, Storage,
    StudyConfig, StudySession, StudyStats, WordLookup,
};

/// HTTP timeout used when the per-lookup budget is disabled
const FALLBACK_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Subvocab - learn the words in what you watch
#[derive(Parser)]
#[command(name = "subvocab")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Study vocabulary from subtitle files with spaced repetition")]
struct Cli {
    /// Directory holding subvocab.db (default: platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print machine-readable JSON where supported
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an .srt file as a new collection
    Import {
        /// Path to the subtitle file
        file: PathBuf,
        /// Collection title (default: file name)
        #[arg(long)]
        title: Option<String>,
    },

    /// List imported collections
    Collections,

    /// Delete a collection and its progress
    Delete {
        /// Collection id
        collection: String,
    },

    /// Show the next word to study without recording anything
    Next {
        /// Collection id
        collection: String,
    },

    /// Record feedback for a word
    Review {
        /// Collection id
        collection: String,
        /// Word to review
        word: String,
        /// hard, good or easy
        #[arg(default_value = "good")]
        feedback: String,
    },

    /// Interactive study loop
    Study {
        /// Collection id
        collection: String,
        /// Stop after this many words
        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// Show progress for a collection
    Stats {
        /// Collection id
        collection: String,
    },

    /// Look a word up in the dictionary
    Lookup {
        word: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries command output; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();

    let storage = open_storage(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Import { file, title } => run_import(&storage, &file, title, cli.json),
        Commands::Collections => run_collections(&storage, cli.json),
        Commands::Delete { collection } => run_delete(&storage, &collection),
        Commands::Next { collection } => run_next(&storage, &collection).await,
        Commands::Review {
            collection,
            word,
            feedback,
        } => run_review(&storage, &collection, &word, &feedback),
        Commands::Study { collection, count } => run_study(&storage, &collection, count).await,
        Commands::Stats { collection } => run_stats(&storage, &collection, cli.json),
        Commands::Lookup { word } => run_lookup(&word, cli.json).await,
    }
}

fn open_storage(data_dir: Option<&Path>) -> anyhow::Result<Storage> {
    let db_path = data_dir.map(|dir| dir.join("subvocab.db"));
    Ok(Storage::new(db_path)?)
}

fn load_collection(storage: &Storage, id: &str) -> anyhow::Result<Collection> {
    storage
        .get_collection(id)?
        .ok_or_else(|| anyhow::anyhow!("No collection with id '{}'", id))
}

fn dictionary_client(config: &StudyConfig) -> anyhow::Result<DictionaryApiClient> {
    let timeout = if config.lookup_timeout_secs == 0 {
        FALLBACK_HTTP_TIMEOUT
    } else {
        config.lookup_timeout()
    };

    let mut client = DictionaryApiClient::new(timeout)?;
    if let Some(url) = &config.dictionary_url {
        client = client.with_base_url(url.clone());
    }
    if let Some(lang) = &config.translation_lang {
        client = client.with_translation(lang.clone());
    }
    Ok(client)
}

/// Words are stored lowercased
fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Run import command
fn run_import(
    storage: &Storage,
    file: &Path,
    title: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)?;
    let title = title.unwrap_or_else(|| {
        file.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    });

    let collection = Collection::from_srt(title, &content);
    if collection.words.is_empty() {
        anyhow::bail!("No study words found in {}", file.display());
    }
    storage.save_collection(&collection)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&collection.summary())?);
        return Ok(());
    }

    println!("{} {}", "Imported".green().bold(), collection.title.bold());
    println!("{}: {}", "Id".white().bold(), collection.id);
    println!("{}: {}", "Words".white().bold(), collection.words.len());
    println!("{}: {}", "Sentences".white().bold(), collection.sentences.len());

    let top: Vec<&str> = collection.words.iter().take(10).map(String::as_str).collect();
    println!("{}: {}", "Most frequent".white().bold(), top.join(", "));
    Ok(())
}

/// Run collections command
fn run_collections(storage: &Storage, json: bool) -> anyhow::Result<()> {
    let collections = storage.list_collections()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&collections)?);
        return Ok(());
    }

    println!("{}", "=== Collections ===".cyan().bold());
    if collections.is_empty() {
        println!("{}", "No collections yet. Import an .srt file to start.".dimmed());
        return Ok(());
    }

    for c in collections {
        println!(
            "  {}  {} ({} words, {})",
            c.id.dimmed(),
            c.title.bold(),
            c.word_count,
            c.created_at.with_timezone(&Local).format("%Y-%m-%d")
        );
    }
    Ok(())
}

/// Run delete command
fn run_delete(storage: &Storage, id: &str) -> anyhow::Result<()> {
    if storage.delete_collection(id)? {
        println!("{} {}", "Deleted".red().bold(), id);
    } else {
        println!("{}", format!("No collection with id '{}'", id).dimmed());
    }
    Ok(())
}

/// Run next command
async fn run_next(storage: &Storage, id: &str) -> anyhow::Result<()> {
    let collection = load_collection(storage, id)?;
    let config = StudyConfig::from_env();
    let client = dictionary_client(&config)?;
    let progress = storage.load_progress(&collection.id)?;
    let mut session = StudySession::from_collection(&collection, progress, client, config);

    match session.next_word() {
        NextWord::Word(word) => {
            let details = session.details(&word).await;
            print_card(&collection, &word, &details);
        }
        NextWord::Finished => println!("{}", "Nothing to study in this collection.".dimmed()),
    }
    Ok(())
}

/// Run review command
fn run_review(storage: &Storage, id: &str, word: &str, feedback: &str) -> anyhow::Result<()> {
    let collection = load_collection(storage, id)?;
    let word = normalize_word(word);
    if !collection.words.contains(&word) {
        anyhow::bail!("'{}' is not in collection '{}'", word, collection.title);
    }

    let feedback = Feedback::parse_name(feedback);
    let previous = storage.get_progress(&collection.id, &word)?;
    let state = ReviewScheduler::new().record_feedback(previous.as_ref(), feedback);
    storage.save_progress(&collection.id, &word, &state)?;

    print_review(&word, feedback, &state);
    Ok(())
}

/// Run study command
async fn run_study(storage: &Storage, id: &str, count: usize) -> anyhow::Result<()> {
    let collection = load_collection(storage, id)?;
    let config = StudyConfig::from_env();
    let client = dictionary_client(&config)?;
    let progress = storage.load_progress(&collection.id)?;
    let mut session = StudySession::from_collection(&collection, progress, client, config);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("{} {}", "Studying".cyan().bold(), collection.title.bold());
    println!("{}", "Answer h(ard), g(ood), e(asy) or q(uit).".dimmed());
    session.prefetch().await;

    let mut reviewed = 0;
    while reviewed < count {
        let word = match session.next_word() {
            NextWord::Word(word) => word,
            NextWord::Finished => {
                println!("{}", "Nothing to study in this collection.".dimmed());
                break;
            }
        };

        let details = session.details(&word).await;
        println!();
        print_card(&collection, &word, &details);

        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;
        let Some(line) = input.next_line().await? else {
            break;
        };
        let answer = line.trim().to_lowercase();
        if answer == "q" || answer == "quit" {
            break;
        }

        let feedback = Feedback::parse_name(&answer);
        if let Some((word, state)) = session.record_feedback(feedback) {
            storage.save_progress(&collection.id, &word, &state)?;
            print_review(&word, feedback, &state);
        }
        reviewed += 1;

        session.prefetch().await;
    }

    let cache = session.cache().stats();
    tracing::debug!(
        hits = cache.hits,
        misses = cache.misses,
        evictions = cache.evictions,
        "Study session finished"
    );

    println!();
    println!("{} {} word(s)", "Reviewed".green().bold(), reviewed);
    print_stats(&session.stats());
    Ok(())
}

/// Run stats command
fn run_stats(storage: &Storage, id: &str, json: bool) -> anyhow::Result<()> {
    let collection = load_collection(storage, id)?;
    let stats = storage.collection_stats(&collection.id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} {}", "===".cyan().bold(), collection.title.cyan().bold());
    print_stats(&stats);
    Ok(())
}

/// Run lookup command
async fn run_lookup(word: &str, json: bool) -> anyhow::Result<()> {
    let config = StudyConfig::from_env();
    let client = dictionary_client(&config)?;
    let word = normalize_word(word);
    let details = client.lookup(&word).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    println!("{}", word.bold());
    let view = match details {
        Some(details) => DetailsView::Ready(details),
        None => DetailsView::NotFound,
    };
    print_details(&view);
    Ok(())
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_card(collection: &Collection, word: &str, details: &DetailsView) {
    println!("{}", word.bold().underline());
    if let Some(sentence) = collection.example_for(word) {
        println!("  \"{}\"", sentence.italic());
    }
    print_details(details);
}

fn print_details(view: &DetailsView) {
    match view {
        DetailsView::Ready(details) => {
            if !details.phonetic.is_empty() {
                println!("  {}", details.phonetic.dimmed());
            }
            for meaning in &details.meanings {
                println!("  {}", meaning.part_of_speech.yellow());
                for (i, definition) in meaning.definitions.iter().enumerate() {
                    println!("    {}. {}", i + 1, definition);
                }
                if let Some(translation) = &meaning.translation {
                    println!("    {} {}", "=".cyan(), translation);
                }
            }
        }
        DetailsView::NotFound => println!("  {}", "No dictionary entry.".dimmed()),
        DetailsView::Unavailable => {
            println!("  {}", "Details unavailable right now.".dimmed())
        }
    }
}

fn print_review(word: &str, feedback: Feedback, state: &subvocab_core::WordReviewState) {
    let label = match feedback {
        Feedback::Hard => feedback.as_str().red().bold(),
        Feedback::Good => feedback.as_str().green().bold(),
        Feedback::Easy => feedback.as_str().cyan().bold(),
    };
    println!(
        "  {} {}: next review in {} day(s) ({}), ease {:.2}",
        label,
        word,
        state.interval,
        state.next_review_date.with_timezone(&Local).format("%Y-%m-%d"),
        state.ease_factor
    );
}

fn print_stats(stats: &StudyStats) {
    println!("{}: {}", "Total Words".white().bold(), stats.total_words);
    println!("{}: {}", "New".white().bold(), stats.new_words);
    println!("{}: {}", "Due for Review".white().bold(), stats.due_words);
    println!("{}: {:.1}%", "Studied".white().bold(), stats.completion() * 100.0);

    if stats.learned_words > 0 {
        println!();
        print_proficiency_row("Beginner", stats.beginner, stats.learned_words, Color::Red);
        print_proficiency_row("Intermediate", stats.intermediate, stats.learned_words, Color::Yellow);
        print_proficiency_row("Advanced", stats.advanced, stats.learned_words, Color::Green);
    }
}

const BAR_WIDTH: usize = 30;

/// Percentage of `total` and how many bar cells it fills
fn bar_fill(count: usize, total: usize) -> (f64, usize) {
    if total == 0 {
        return (0.0, 0);
    }
    let share = count as f64 / total as f64;
    let cells = (share * BAR_WIDTH as f64).round() as usize;
    (share * 100.0, cells.min(BAR_WIDTH))
}

fn print_proficiency_row(label: &str, count: usize, total: usize, color: Color) {
    let (percent, filled) = bar_fill(count, total);
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
    println!("  {:<13} {} {:>4} {:>6.1}%", label, bar.color(color), count, percent);
}
