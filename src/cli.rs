//! Command-line interface implementation

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::{self, ConfigError};
use crate::engine::ThemeEngine;
use crate::error::RethemeError;
use crate::host::{self, Notifier, ThemePicker, Workspace};
use crate::models::ThemeEntry;
use crate::watch::{watch_and_reapply, WatchOptions, DEFAULT_DEBOUNCE_MS};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Retheme - detect and rewrite share-grid emoji themes in game results
#[derive(Parser)]
#[command(name = "rth")]
#[command(about = "Retheme - detect and rewrite share-grid emoji themes in game results")]
#[command(version)]
pub struct Cli {
    /// Path to retheme.toml (discovered by walking up when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON theme overrides, applied after the config file's themes
    #[arg(long, global = true, value_name = "FILE")]
    pub themes: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered theme names in order
    List,

    /// Print the theme a document appears to use
    Detect {
        /// Input file; stdin when omitted and piped
        input: Option<PathBuf>,
    },

    /// Rewrite a document from its detected theme to the chosen one
    Apply {
        /// Target theme name; prompts on an interactive terminal when omitted
        #[arg(short, long)]
        theme: Option<String>,

        /// Input file; stdin when omitted and piped
        input: Option<PathBuf>,

        /// Output file; stdout when omitted
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<PathBuf>,

        /// Rewrite the input file in place
        #[arg(long, requires = "input")]
        in_place: bool,
    },

    /// Watch a document and keep it in the chosen theme
    Watch {
        /// Target theme name
        #[arg(short, long)]
        theme: String,

        /// File to watch and rewrite in place
        input: PathBuf,

        /// Debounce delay in milliseconds
        #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
        debounce_ms: u64,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            run_with_engine(cli.config.as_deref(), cli.themes.as_deref(), run_list)
        }
        Commands::Detect { input } => {
            run_with_engine(cli.config.as_deref(), cli.themes.as_deref(), |engine| {
                run_detect(engine, input.as_deref())
            })
        }
        Commands::Apply { theme, input, output, in_place } => {
            run_with_engine(cli.config.as_deref(), cli.themes.as_deref(), |engine| {
                run_apply(engine, theme.as_deref(), input.as_deref(), output.as_deref(), in_place)
            })
        }
        Commands::Watch { theme, input, debounce_ms } => {
            if cli.themes.is_some() {
                eprintln!("Warning: --themes is ignored in watch mode; use retheme.toml");
            }
            let options = WatchOptions {
                input,
                theme,
                config_path: cli.config,
                debounce_ms,
            };
            match watch_and_reapply(options) {
                Ok(()) => ExitCode::from(EXIT_SUCCESS),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
    }
}

/// Build the engine from configuration, then run a subcommand against it.
fn run_with_engine(
    config_path: Option<&Path>,
    themes_json: Option<&Path>,
    f: impl FnOnce(&mut ThemeEngine) -> ExitCode,
) -> ExitCode {
    match build_engine(config_path, themes_json) {
        Ok(mut engine) => f(&mut engine),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
    }
}

/// Load the config file plus any JSON overrides into a fresh engine.
fn build_engine(
    config_path: Option<&Path>,
    themes_json: Option<&Path>,
) -> Result<ThemeEngine, ConfigError> {
    let config = config::load_config(config_path)?;
    let mut overrides = config.into_overrides();
    if let Some(path) = themes_json {
        let entries = config::load_overrides_json(path)?;
        overrides.extend(entries.into_iter().map(ThemeEntry::into_parts));
    }

    let mut engine = ThemeEngine::new();
    for warning in engine.reload_themes(overrides) {
        eprintln!("Warning: {}", warning.message);
    }
    Ok(engine)
}

/// Execute the list command
fn run_list(engine: &mut ThemeEngine) -> ExitCode {
    for name in engine.theme_names() {
        println!("{}", name);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the detect command
fn run_detect(engine: &mut ThemeEngine, input: Option<&Path>) -> ExitCode {
    let text = match read_input(input) {
        Ok(Some(text)) => text,
        Ok(None) => {
            eprintln!("Error: {}", RethemeError::NoActiveSource);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(e) => {
            eprintln!("Error: Cannot read input: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if !engine.is_result_text(&text) {
        eprintln!("Error: {}", RethemeError::InvalidInput);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("{}", engine.detect_theme(&text));
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the apply command
fn run_apply(
    engine: &mut ThemeEngine,
    theme: Option<&str>,
    input: Option<&Path>,
    output: Option<&Path>,
    in_place: bool,
) -> ExitCode {
    let text = match read_input(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: Cannot read input: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let sink = if in_place {
        match input {
            Some(path) => OutputSink::File(path.to_path_buf()),
            None => {
                eprintln!("Error: --in-place requires an input file");
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    } else {
        match output {
            Some(path) => OutputSink::File(path.to_path_buf()),
            None => OutputSink::Stdout,
        }
    };

    let mut picker = match theme {
        Some(name) => CliPicker::fixed(name),
        // Prompting needs an interactive terminal, and stdin must not
        // already be carrying the document text.
        None if input.is_some() && atty::is(atty::Stream::Stdin) => CliPicker::console(),
        None => {
            eprintln!("Error: no theme given; pass --theme <name> (see 'rth list')");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut workspace = CliWorkspace { text, sink };
    let mut notifier = StderrNotifier;

    if host::change_theme(engine, &mut workspace, &mut picker, &mut notifier) {
        ExitCode::from(EXIT_SUCCESS)
    } else if picker.cancelled {
        // A cancelled pick is a deliberate no-op, not a failure.
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Read the document text from a file, or from stdin when piped.
///
/// Returns Ok(None) when there is no input at all (no path, stdin is an
/// interactive terminal).
fn read_input(input: Option<&Path>) -> io::Result<Option<String>> {
    match input {
        Some(path) => fs::read_to_string(path).map(Some),
        None => {
            if atty::is(atty::Stream::Stdin) {
                Ok(None)
            } else {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(Some(buf))
            }
        }
    }
}

/// Where the re-themed text goes.
enum OutputSink {
    Stdout,
    File(PathBuf),
}

/// One-shot workspace over the text read for this invocation.
struct CliWorkspace {
    text: Option<String>,
    sink: OutputSink,
}

impl Workspace for CliWorkspace {
    fn current_text(&self) -> Option<String> {
        self.text.clone()
    }

    fn replace_all(&mut self, new_text: &str) -> bool {
        match &self.sink {
            OutputSink::Stdout => {
                print!("{}", new_text);
                io::stdout().flush().is_ok()
            }
            OutputSink::File(path) => fs::write(path, new_text).is_ok(),
        }
    }
}

/// Theme choice for the apply command: a fixed name from the flag, or a
/// numbered console prompt.
struct CliPicker {
    fixed: Option<String>,
    cancelled: bool,
}

impl CliPicker {
    fn fixed(name: &str) -> Self {
        Self { fixed: Some(name.to_string()), cancelled: false }
    }

    fn console() -> Self {
        Self { fixed: None, cancelled: false }
    }

    fn prompt(&self, names: &[String]) -> Option<String> {
        eprintln!("Pick a theme:");
        for (index, name) in names.iter().enumerate() {
            eprintln!("  {}. {}", index + 1, name);
        }
        eprint!("> ");

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok()?;
        let choice: usize = line.trim().parse().ok()?;
        choice.checked_sub(1).and_then(|i| names.get(i)).cloned()
    }
}

impl ThemePicker for CliPicker {
    fn pick(&mut self, names: &[String]) -> Option<String> {
        let picked = match &self.fixed {
            Some(name) => Some(name.clone()),
            None => self.prompt(names),
        };
        self.cancelled = picked.is_none();
        picked
    }
}

/// Error reporting to stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&mut self, message: &str) {
        eprintln!("Error: {}", message);
    }
}
