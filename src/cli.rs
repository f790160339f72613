use crate::graphql::schema::MergeMode;
use clap::Parser;
use colored::Colorize;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE_NAME: &str = ".gqltsrc.json";
const DEFAULT_INPUT_DIR: &str = "./schemas";
const DEFAULT_OUTPUT_PATH: &str = "./generated-types.ts";

#[derive(Debug, Parser)]
#[command(
    name = "gqlts",
    version,
    about = "\nGraphQL Schema to TypeScript (gqlts) compiles the types, enums, queries and mutations of GraphQL SDL files into a single TypeScript module."
)]
struct Cli {
    /// Directory to recursively scan for schema files [default: ./schemas]
    #[arg(long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Path of the generated TypeScript file [default: ./generated-types.ts]
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Keep the first definition instead of failing when a type or enum is redefined with a different shape
    #[arg(long = "skipChecks")]
    skip_checks: bool,

    /// Print progress information while compiling
    #[arg(long)]
    debug: bool,

    /// Path of the JSON config file (defaults to ./.gqltsrc.json when it exists)
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    config_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    #[serde(default)]
    skip_checks: bool,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    custom_scalars: BTreeMap<String, String>,
}

impl ConfigFile {
    fn from_path(path: &Path) -> Result<Self, PrintableMessage> {
        let file = File::open(path)
            .map_err(|io_error| PrintableMessage::new_config_error(path, &io_error))?;
        let mut config: ConfigFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|json_error| PrintableMessage::new_config_error(path, &json_error))?;
        // Paths in the file are relative to the file itself
        let config_dir = path.parent().unwrap_or_else(|| Path::new(""));
        config.input = config.input.map(|input| config_dir.join(input));
        config.output = config.output.map(|output| config_dir.join(output));
        Ok(config)
    }
}

/// User configured runtime configuration
#[derive(Debug)]
pub struct RuntimeConfig {
    input_dir: PathBuf,
    output_path: PathBuf,
    skip_checks: bool,
    debug: bool,
    custom_scalars: BTreeMap<String, String>,
}

impl RuntimeConfig {
    pub fn from_cli() -> Result<Self, PrintableMessage> {
        let cli = Cli::parse();
        let config_file = match &cli.config_file {
            Some(path) => ConfigFile::from_path(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE_NAME);
                if default_path.is_file() {
                    ConfigFile::from_path(default_path)?
                } else {
                    ConfigFile::default()
                }
            }
        };
        Ok(RuntimeConfig::from_layers(cli, config_file))
    }

    /// Command line values take precedence over the config file
    fn from_layers(cli: Cli, config_file: ConfigFile) -> Self {
        RuntimeConfig {
            input_dir: cli
                .input
                .or(config_file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR)),
            output_path: cli
                .output
                .or(config_file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            skip_checks: cli.skip_checks || config_file.skip_checks,
            debug: cli.debug || config_file.debug,
            custom_scalars: config_file.custom_scalars,
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn merge_mode(&self) -> MergeMode {
        if self.skip_checks {
            MergeMode::Permissive
        } else {
            MergeMode::Strict
        }
    }

    pub fn debug_log(&self) -> DebugLog {
        DebugLog::new(self.debug)
    }

    pub fn custom_scalars(&self) -> &BTreeMap<String, String> {
        &self.custom_scalars
    }
}

/// Progress tracing, printed to stdout when `--debug` is set
#[derive(Debug, Clone, Copy)]
pub struct DebugLog {
    enabled: bool,
}

impl DebugLog {
    pub fn new(enabled: bool) -> Self {
        DebugLog { enabled }
    }

    pub fn trace(&self, message: fmt::Arguments<'_>) {
        if self.enabled {
            println!("{}: {message}", "debug".dimmed());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageLevel {
    CompileError,
    ProgramError,
    Warning,
}

#[derive(Debug)]
pub struct PrintableMessage {
    level: MessageLevel,
    description: String,
    source_path: Option<PathBuf>,
    help_text: Option<String>,
}

impl PrintableMessage {
    fn new(level: MessageLevel, description: &str) -> Self {
        PrintableMessage {
            level,
            description: description.to_string(),
            source_path: None,
            help_text: None,
        }
    }

    pub fn new_simple_compile_error(description: &str) -> Self {
        Self::new(MessageLevel::CompileError, description)
    }

    pub fn new_simple_program_error(description: &str) -> Self {
        Self::new(MessageLevel::ProgramError, description)
    }

    pub fn new_compile_warning(description: &str) -> Self {
        Self::new(MessageLevel::Warning, description)
    }

    pub fn new_compile_error_from_read_io_error(io_error: &std::io::Error, path: &Path) -> Self {
        Self::new_simple_compile_error(&format!(
            "could not read `{}`: {io_error}",
            path.display()
        ))
    }

    pub fn new_compile_error_from_write_io_error(io_error: &std::io::Error, path: &Path) -> Self {
        Self::new_simple_compile_error(&format!(
            "could not write `{}`: {io_error}",
            path.display()
        ))
    }

    fn new_config_error(path: &Path, error: &dyn std::error::Error) -> Self {
        Self::new_simple_program_error(&format!(
            "error in config file `{}`: {error}",
            path.display()
        ))
    }

    pub fn with_source_information(&mut self, path: &Path) {
        self.source_path = Some(path.to_path_buf());
    }

    pub fn with_help_text(&mut self, help_text: &str) {
        self.help_text = Some(help_text.to_string());
    }
}

impl fmt::Display for PrintableMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.level {
            MessageLevel::CompileError => "error".red().bold(),
            MessageLevel::ProgramError => "program error".red().bold(),
            MessageLevel::Warning => "warning".yellow().bold(),
        };
        write!(f, "{label}: {}", self.description)?;
        if let Some(path) = &self.source_path {
            write!(f, "\n  {} {}", "-->".blue().bold(), path.display())?;
        }
        if let Some(help_text) = &self.help_text {
            write!(f, "\n  {} help: {help_text}", "=".blue().bold())?;
        }
        Ok(())
    }
}

/// Prints the result of the program to the screen.
pub fn print_work_result(messages: Vec<PrintableMessage>, result: Result<PathBuf, PrintableMessage>) {
    for message in &messages {
        println!("{message}");
    }
    let code = match result {
        Ok(output_path) => {
            println!(
                "TypeScript file generation completed. File saved at: {}",
                output_path.display()
            );
            return;
        }
        Err(error) => {
            println!("{error}");
            1
        }
    };
    std::process::exit(code);
}
