//! Command-line interface for the codeflow utility
//!
//! Provides commands to extract code blocks, preview and export diagram
//! documents, request completions, and run an interactive session.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::colorizer::{colorize_preview, ColorChoice};
use crate::repl::Repl;
use codeflow::completion::{request_item, CompletionConfig, HttpCompletionClient};
use codeflow::core::logging::init_logging;
use codeflow::diagram::DiagramDocument;
use codeflow::session::{read_uploads, Action, Export, SessionState};
use codeflow::{extract_code_blocks, ExportFormat};

/// Codeflow - turn AI-generated code snippets into an exportable flow
#[derive(Parser)]
#[command(name = "codeflow")]
#[command(about = "Extract AI-generated code blocks, wire them into a flow and export the result")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Overrides for the completion endpoint, applied on top of the environment
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionArgs {
    /// Chat-completion endpoint URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Model name sent with each request
    #[arg(long)]
    pub model: Option<String>,

    /// Response token limit
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl CompletionArgs {
    /// Environment config with these flags layered on top
    pub fn into_config(self, base: CompletionConfig) -> CompletionConfig {
        let mut config = base;
        if let Some(url) = self.api_url {
            config = config.with_endpoint(url);
        }
        if let Some(model) = self.model {
            config = config.with_model(model);
        }
        if let Some(max_tokens) = self.max_tokens {
            config = config.with_max_tokens(max_tokens);
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the fenced code blocks found in text
    Extract {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the blocks as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print the linearized preview of a diagram document
    Preview {
        /// Diagram document in JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Write the preview of a diagram document to flow-diagram<ext>
    Export {
        /// Diagram document in JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Extension of the exported file
        #[arg(short, long, default_value_t = ExportFormat::default(), value_parser = parse_format)]
        format: ExportFormat,

        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Request one completion and print the resulting item
    Generate {
        /// Prompt text
        #[arg(short, long)]
        prompt: String,

        /// Name for the item
        #[arg(short, long)]
        name: Option<String>,

        /// Files whose contents are appended to the prompt
        #[arg(long = "file")]
        files: Vec<PathBuf>,

        /// Print the item as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        completion: CompletionArgs,
    },

    /// Show supported export formats
    Formats {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session
    Session {
        /// Initial export format
        #[arg(short, long, default_value_t = ExportFormat::default(), value_parser = parse_format)]
        format: ExportFormat,

        /// Directory used by `download`
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        #[command(flatten)]
        completion: CompletionArgs,
    },
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    value.parse::<ExportFormat>().map_err(|e| e.to_string())
}

/// Main CLI application
pub struct CodeflowApp {
    base_config: CompletionConfig,
}

impl CodeflowApp {
    /// Create a new application reading endpoint settings from the environment
    pub fn new() -> Self {
        Self::with_config(CompletionConfig::from_env())
    }

    /// Create a new application with an explicit base config
    pub fn with_config(base_config: CompletionConfig) -> Self {
        Self { base_config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Flags win over CODEFLOW_LOG_LEVEL / RUST_LOG / CODEFLOW_LOG_FORMAT
        if let Err(e) = init_logging(
            cli.log_level.map(|level| level.as_str()),
            cli.log_format.map(|format| format.as_str()),
        ) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Codeflow v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Extract {
                input,
                output,
                json,
            } => self.extract_command(input, output, json, cli.verbose),
            Commands::Preview {
                input,
                output,
                color,
            } => self.preview_command(input, output, color, cli.verbose),
            Commands::Export { input, format, dir } => {
                self.export_command(input, format, &dir, cli.verbose)
            }
            Commands::Generate {
                prompt,
                name,
                files,
                json,
                completion,
            } => self.generate_command(prompt, name, files, json, completion, cli.verbose),
            Commands::Formats { json } => self.formats_command(json, cli.verbose),
            Commands::Session {
                format,
                dir,
                color,
                completion,
            } => self.session_command(format, dir, color, completion),
        }
    }

    fn completion_config(&self, args: CompletionArgs) -> CompletionConfig {
        args.into_config(self.base_config.clone())
    }

    /// Handle the extract command
    fn extract_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let blocks = extract_code_blocks(&content);
        debug!(block_count = blocks.len(), "Extracted code blocks");

        let rendered = if json {
            serde_json::to_string_pretty(&blocks)?
        } else {
            blocks.join("\n\n")
        };
        self.write_output(output, &rendered)
    }

    /// Handle the preview command
    fn preview_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let document = self.read_document(input)?;

        if verbose {
            eprintln!(
                "Loaded {} nodes and {} edges",
                document.nodes.len(),
                document.edges.len()
            );
        }

        let preview = document.preview();
        let rendered = if color.should_colorize(output.as_deref()) {
            colorize_preview(&preview)
        } else {
            preview
        };
        self.write_output(output, &rendered)
    }

    /// Handle the export command
    fn export_command(
        &self,
        input: Option<PathBuf>,
        format: ExportFormat,
        dir: &Path,
        verbose: bool,
    ) -> Result<()> {
        let document = self.read_document(input)?;
        let export = Export::new(format, document.preview());
        let path = export
            .write_to(dir)
            .with_context(|| format!("Failed to export into '{}'", dir.display()))?;

        if verbose {
            eprintln!("Wrote {} bytes", export.content.len());
        }
        println!("{}", path.display());
        Ok(())
    }

    /// Handle the generate command
    fn generate_command(
        &self,
        prompt: String,
        name: Option<String>,
        files: Vec<PathBuf>,
        json: bool,
        completion: CompletionArgs,
        verbose: bool,
    ) -> Result<()> {
        let client = HttpCompletionClient::new(self.completion_config(completion));
        let runtime = tokio::runtime::Runtime::new()?;

        let mut state = SessionState::new();
        for (path, result) in files.iter().zip(runtime.block_on(read_uploads(&files))) {
            match result {
                Ok(upload) => {
                    if verbose {
                        eprintln!("Uploaded {}", path.display());
                    }
                    state = state.apply(upload.into_action())?;
                }
                Err(e) => eprintln!("Skipping {}: {}", path.display(), e),
            }
        }

        state = state.apply(Action::SetPrompt(prompt))?;
        if let Some(name) = name {
            state = state.apply(Action::SetPromptName(name))?;
        }

        let action = runtime
            .block_on(request_item(&client, state.completion_request()))
            .map_err(|e| anyhow!("Error fetching completion response: {}", e))?;
        state = state.apply(action)?;

        let item = state
            .items()
            .last()
            .ok_or_else(|| anyhow!("Completion produced no item"))?;
        info!(item_id = %item.id, "Generated item");

        if json {
            println!("{}", serde_json::to_string_pretty(item)?);
        } else {
            if verbose {
                eprintln!("{} ({})", item.name, item.id);
            }
            self.write_output(None, &item.text)?;
        }
        Ok(())
    }

    /// Handle the formats command
    fn formats_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing export formats");
        }

        let formats = ExportFormat::all();
        if json {
            let entries: Vec<_> = formats
                .iter()
                .map(|format| {
                    serde_json::json!({
                        "extension": format.extension(),
                        "language": format.language(),
                        "default": *format == ExportFormat::default(),
                    })
                })
                .collect();
            let listing = serde_json::json!({
                "formats": entries,
                "total": formats.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Export formats:");
            for format in formats {
                let marker = if *format == ExportFormat::default() {
                    " (default)"
                } else {
                    ""
                };
                println!("  {:<5} - {}{}", format.extension(), format.language(), marker);
            }
            println!();
            println!("Total: {} formats supported", formats.len());
        }

        Ok(())
    }

    /// Handle the session command
    fn session_command(
        &self,
        format: ExportFormat,
        dir: PathBuf,
        color: ColorChoice,
        completion: CompletionArgs,
    ) -> Result<()> {
        let client = HttpCompletionClient::new(self.completion_config(completion));
        if !client.config().has_credentials() {
            eprintln!(
                "Warning: no API key found; `create` will fail until {} is set",
                codeflow::completion::API_KEY_ENV
            );
        }

        let runtime = tokio::runtime::Runtime::new()?;
        let state = SessionState::new().apply(Action::SelectFormat(format))?;
        let mut repl = Repl::new(state, dir, color.should_colorize(None));

        let stdin = io::stdin();
        let stdout = io::stdout();
        runtime.block_on(repl.run(&client, stdin.lock(), stdout.lock()))
    }

    fn read_document(&self, input: Option<PathBuf>) -> Result<DiagramDocument> {
        let content = self.read_input(input)?;
        Ok(DiagramDocument::from_json(&content)?)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for CodeflowApp {
    fn default() -> Self {
        Self::new()
    }
}
