//! Silent-Structure translator CLI
//!
//! # Usage
//!
//! ```bash
//! # Describe an SS pattern in plain language
//! echo '[]→{} #goal' | ss_cli to-text
//!
//! # Suggest an SS pattern for a sentence
//! ss_cli to-ss --file request.txt
//!
//! # Inspect the lexicon
//! ss_cli --lexicon my_lexicon.yaml stats
//! ss_cli index --limit 20 -o json
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::prelude::*;

use ss_translate::{
    build_match_indices, LexiconStore, MatchIndices, Termination, Translator, TranslatorConfig,
};

#[derive(Parser)]
#[command(name = "ss_cli")]
#[command(version)]
#[command(about = "Translate between Silent-Structure notation and natural language")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,

    /// Lexicon YAML file (built-in lexicon if not provided)
    #[arg(long, global = true, env = "SS_LEXICON_PATH")]
    lexicon: Option<PathBuf>,

    /// Translator config YAML file (defaults if not provided)
    #[arg(long, global = true, env = "SS_TRANSLATOR_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate SS notation into a natural-language description
    ToText {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Suggest an SS pattern for natural-language input
    ToSs {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the SS and NL match indices in priority order
    Index {
        /// Show at most this many entries per index
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show lexicon statistics
    Stats,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ss_translate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let lexicon = Arc::new(load_lexicon(cli.lexicon.as_deref())?);

    match &cli.command {
        Commands::ToText { file } => {
            let translator = load_translator(lexicon, cli.config.as_deref())?;
            cmd_to_text(&translator, file.as_deref(), cli.format)
        }
        Commands::ToSs { file } => {
            let translator = load_translator(lexicon, cli.config.as_deref())?;
            cmd_to_ss(&translator, file.as_deref(), cli.format)
        }
        Commands::Index { limit } => {
            cmd_index(&build_match_indices(lexicon), *limit, cli.format)
        }
        Commands::Stats => cmd_stats(&lexicon, cli.format),
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_to_text(translator: &Translator, file: Option<&Path>, format: OutputFormat) -> Result<()> {
    let source = read_input(file)?;
    let reading = translator.read_symbolic(&source);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "output": reading.render(),
                "segments": reading.segments,
                "termination": reading.termination,
            });
            print_json(&output)?;
        }
        OutputFormat::Text => {
            println!("{}", reading.render());
            report_termination(&reading.termination);
        }
    }

    Ok(())
}

fn cmd_to_ss(translator: &Translator, file: Option<&Path>, format: OutputFormat) -> Result<()> {
    let source = read_input(file)?;
    let pattern = translator.suggest_pattern(&source);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "output": pattern.render(),
                "segments": pattern.segments,
                "translated": pattern.translated,
                "termination": pattern.termination,
            });
            print_json(&output)?;
        }
        OutputFormat::Text => {
            println!("{}", pattern.render());
            report_termination(&pattern.termination);
        }
    }

    Ok(())
}

fn cmd_index(indices: &MatchIndices, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let limit = limit.unwrap_or(usize::MAX);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "fingerprint": indices.fingerprint(),
                "ss": indices.ss().iter().take(limit).collect::<Vec<_>>(),
                "nl": indices.nl().iter().take(limit).collect::<Vec<_>>(),
            });
            print_json(&output)?;
        }
        OutputFormat::Text => {
            println!(
                "{}",
                format!("SS index ({} entries)", indices.ss().len()).cyan().bold()
            );
            for (i, entry) in indices.ss().iter().take(limit).enumerate() {
                println!(
                    "  [{:>3}] {:<12} {}",
                    i,
                    entry.category.to_string().yellow(),
                    entry.trigger
                );
            }
            println!();
            println!(
                "{}",
                format!("NL index ({} entries)", indices.nl().len()).cyan().bold()
            );
            for (i, phrase) in indices.nl().iter().take(limit).enumerate() {
                let snippet = indices.lexicon().nl_snippet(phrase).unwrap_or_default();
                println!("  [{:>3}] {} {} {}", i, phrase, "=>".dimmed(), snippet.green());
            }
        }
    }

    Ok(())
}

fn cmd_stats(lexicon: &LexiconStore, format: OutputFormat) -> Result<()> {
    let stats = lexicon.stats();

    match format {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Text => {
            print!("{}", stats);
            println!("  Total triggers: {}", stats.trigger_count());
        }
    }

    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn load_lexicon(path: Option<&Path>) -> Result<LexiconStore> {
    match path {
        Some(path) => ss_lexicon::load_from_path(path)
            .with_context(|| format!("Failed to load lexicon '{}'", path.display())),
        None => ss_lexicon::builtin().context("Built-in lexicon is invalid"),
    }
}

fn load_translator(lexicon: Arc<LexiconStore>, config: Option<&Path>) -> Result<Translator> {
    let config = TranslatorConfig::load(config).context("Failed to load translator config")?;
    Ok(Translator::from_lexicon(lexicon).with_config(config))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            if atty::is(atty::Stream::Stdin) {
                anyhow::bail!("No input provided. Use --file or pipe input via stdin.");
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}

fn report_termination(termination: &Termination) {
    match termination {
        Termination::Halted { max_steps } => eprintln!(
            "{} scan stopped after {} steps; output is partial",
            "warning".yellow().bold(),
            max_steps
        ),
        Termination::Stuck => eprintln!(
            "{} scan gave up before the end of input",
            "warning".yellow().bold()
        ),
        Termination::Completed | Termination::Empty => {}
    }
}
