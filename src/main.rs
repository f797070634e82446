//! Application entry point — Text Polisher CLI.
//!
//! # Startup sequence
//!
//! 1. Initialise logging (stderr; stdout carries only text).
//! 2. Parse the command line.
//! 3. Load [`AppConfig`] (returns default on first run).
//! 4. Pick the credential store (environment variable first, then key file).
//! 5. Create the [`tokio`] runtime and run the subcommand.

use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use text_polisher::{
    config::{AppConfig, AppPaths},
    correction::{normalize, CorrectionOrchestrator, CorrectionResult},
    credential::{CredentialStore, EnvCredentialStore, FileCredentialStore},
    integration::{
        copy_to_clipboard, process_text, read_clipboard, ProcessTextOutcome, ProcessTextRequest,
    },
    llm::InstructionPreset,
};

/// Exit status for empty input.
const EXIT_EMPTY_INPUT: u8 = 1;
/// Exit status for a read-only process-text request (interaction cancelled).
const EXIT_READ_ONLY: u8 = 3;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "text-polisher", version)]
#[command(about = "Grammar and spelling correction with an LLM, falling back to local cleanup")]
struct Cli {
    /// Use this settings file instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct text given as arguments, on stdin, or on the clipboard
    Correct {
        /// Text to correct (reads stdin when omitted)
        text: Vec<String>,

        /// Skip the remote call and use the local normalizer
        #[arg(long)]
        local: bool,

        /// Copy the result to the clipboard
        #[arg(long)]
        copy: bool,

        /// Read the input from the clipboard
        #[arg(long, conflicts_with = "text")]
        from_clipboard: bool,

        /// Instruction preset for this run (english, polish)
        #[arg(long)]
        preset: Option<InstructionPreset>,
    },

    /// Apply only the local normalizer
    Normalize {
        /// Text to normalize (reads stdin when omitted)
        text: Vec<String>,
    },

    /// Host integration: selected text on stdin, replacement on stdout
    ProcessText {
        /// The source is read-only; print the text unchanged and exit 3
        #[arg(long)]
        read_only: bool,
    },

    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key
    Set { key: String },
    /// Remove the stored API key
    Clear,
    /// Report whether a usable key is configured
    Status,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings file path
    Path,
    /// Write the current settings (defaults on first run) to disk
    Init,
    /// Print the effective settings as TOML
    Show,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Command line
    let cli = Cli::parse();

    // 3. Configuration
    let settings_file = cli
        .config
        .clone()
        .unwrap_or_else(|| AppPaths::new().settings_file);
    let config = AppConfig::load_from(&settings_file).unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    match cli.command {
        Commands::Correct {
            text,
            local,
            copy,
            from_clipboard,
            preset,
        } => {
            let input = if from_clipboard {
                read_clipboard()?.unwrap_or_default()
            } else {
                input_text(text)?
            };
            let mut llm = config.llm.clone();
            if let Some(preset) = preset {
                llm.preset = preset;
                llm.system_instruction = None;
            }
            let orchestrator =
                CorrectionOrchestrator::from_config(&llm, credential_store(&cli.config));

            let result = if local {
                orchestrator.correct_local(&input)
            } else {
                runtime()?.block_on(orchestrator.correct(&input))
            };

            match result {
                CorrectionResult::Success { text } => {
                    println!("{text}");
                    if copy || config.output.copy_to_clipboard {
                        match copy_to_clipboard(&text) {
                            Ok(()) => log::info!("Copied to clipboard"),
                            Err(e) => log::warn!("{e}"),
                        }
                    }
                    Ok(ExitCode::SUCCESS)
                }
                CorrectionResult::Failure { reason } => {
                    eprintln!("Nothing to correct: {reason}");
                    Ok(ExitCode::from(EXIT_EMPTY_INPUT))
                }
            }
        }

        Commands::Normalize { text } => {
            println!("{}", normalize(&input_text(text)?));
            Ok(ExitCode::SUCCESS)
        }

        Commands::ProcessText { read_only } => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;

            let orchestrator =
                CorrectionOrchestrator::from_config(&config.llm, credential_store(&cli.config));
            let request = ProcessTextRequest::new(input, read_only);
            let outcome = runtime()?.block_on(process_text(&orchestrator, request));

            let mut stdout = std::io::stdout().lock();
            stdout.write_all(outcome.text().as_bytes())?;
            stdout.flush()?;

            Ok(match outcome {
                ProcessTextOutcome::Replace(_) => ExitCode::SUCCESS,
                ProcessTextOutcome::ShowReadOnly(_) => ExitCode::from(EXIT_READ_ONLY),
            })
        }

        Commands::Key { action } => {
            let store = FileCredentialStore::at(key_file(&cli.config));
            match action {
                KeyAction::Set { key } => {
                    store.save(&key)?;
                    println!("API key saved to {}", store.path().display());
                }
                KeyAction::Clear => {
                    store.clear()?;
                    println!("API key removed");
                }
                KeyAction::Status => {
                    let env = EnvCredentialStore::from_default_var();
                    if env.is_set() {
                        println!("environment key: {}", presence(env.is_present()));
                    }
                    println!(
                        "stored key ({}): {}",
                        store.path().display(),
                        presence(store.is_present())
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config { action } => {
            match action {
                ConfigAction::Path => println!("{}", settings_file.display()),
                ConfigAction::Init => {
                    config.save_to(&settings_file)?;
                    println!("Settings written to {}", settings_file.display());
                }
                ConfigAction::Show => print!("{}", toml::to_string_pretty(&config)?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")
}

/// Environment variable wins when set; otherwise the key file.
fn credential_store(config: &Option<PathBuf>) -> Arc<dyn CredentialStore> {
    let env = EnvCredentialStore::from_default_var();
    if env.is_set() {
        log::debug!("using API key from environment");
        Arc::new(env)
    } else {
        Arc::new(FileCredentialStore::at(key_file(config)))
    }
}

/// Key file next to an explicit `--config`, else the platform default.
fn key_file(config: &Option<PathBuf>) -> PathBuf {
    match config.as_ref().and_then(|p| p.parent()) {
        Some(dir) if !dir.as_os_str().is_empty() => {
            AppPaths::in_dir(dir.to_path_buf()).credential_file
        }
        _ => AppPaths::new().credential_file,
    }
}

/// Joined arguments, or all of stdin when there are none.
fn input_text(args: Vec<String>) -> Result<String> {
    if !args.is_empty() {
        return Ok(args.join(" "));
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter text, then Ctrl-D:");
    }
    let mut input = String::new();
    stdin.read_to_string(&mut input).context("reading stdin")?;
    Ok(input)
}

fn presence(present: bool) -> &'static str {
    if present {
        "configured"
    } else {
        "not configured"
    }
}
