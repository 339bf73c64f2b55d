// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use subnorm::app_config::{self, Config, OutputFormat};
use subnorm::fetch::{HttpFetcher, fetch_and_normalize};
use subnorm::file_utils::FileManager;
use subnorm::subtitle_processor::{self, ParsedDocument, SubtitleFormat};

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Vtt,
    Ass,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Vtt => SubtitleFormat::Vtt,
            CliSubtitleFormat::Ass => SubtitleFormat::Ass,
        }
    }
}

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Json,
    Srt,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Srt => OutputFormat::Srt,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Output options shared by parse and fetch
#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output file (stdout when omitted; ignored for directories)
    #[arg(short, long, value_name = "OUTPUT_PATH")]
    output: Option<PathBuf>,

    /// Output document format
    #[arg(short = 't', long = "to", value_enum)]
    to: Option<CliOutputFormat>,

    /// Write compact JSON instead of pretty-printed JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// Subtitle file or directory to normalize
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Subtitle format (inferred from the file extension when omitted)
    #[arg(short, long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Overwrite existing output files when processing a directory
    #[arg(short = 'F', long)]
    force_overwrite: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// URL of the subtitle document
    #[arg(value_name = "URL")]
    url: String,

    /// Subtitle format of the remote document
    #[arg(short, long, value_enum)]
    format: CliSubtitleFormat,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize a local subtitle file or every subtitle file in a directory
    Parse(ParseArgs),

    /// Download a subtitle document and normalize it
    Fetch(FetchArgs),

    /// Generate shell completions for subnorm
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subnorm - Subtitle normalization
///
/// Converts SRT, WebVTT and ASS/SSA subtitles into one ordered list of
/// captions with canonical HH:MM:SS,mmm timestamps and plain text.
#[derive(Parser, Debug)]
#[command(name = "subnorm")]
#[command(version)]
#[command(about = "Normalize SRT, WebVTT and ASS subtitles to plain timed captions")]
#[command(long_about = "subnorm parses SRT, WebVTT and ASS/SSA subtitles and emits one ordered list of captions.

EXAMPLES:
    subnorm parse episode.ass                        # JSON to stdout, format from extension
    subnorm parse -f vtt captions.txt -o out.json    # Explicit format and output file
    subnorm parse -t srt episode.ass                 # Re-emit as SubRip
    subnorm parse ./subs/                            # Normalize a whole directory
    subnorm fetch -f srt https://example.com/ep1.srt # Download and normalize
    subnorm completions bash > subnorm.bash          # Generate bash completions

CONFIGURATION:
    Settings are read from conf.json by default (see --config-path). A missing
    file means built-in defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json", env = "SUBNORM_CONFIG")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and emoji for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subnorm", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config_path)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    config.validate()
        .context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Parse(args) => run_parse(args, &config),
        Commands::Fetch(args) => run_fetch(args, &config).await,
        Commands::Completions { .. } => Ok(()),
    }
}

/// Resolved output settings: CLI flags over config
fn output_settings(args: &OutputArgs, config: &Config) -> (OutputFormat, bool) {
    let format = args.to.map(OutputFormat::from).unwrap_or(config.output.format);
    let pretty = config.output.pretty && !args.compact;
    (format, pretty)
}

fn render(document: &ParsedDocument, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(document.to_json(pretty)?),
        OutputFormat::Srt => Ok(document.to_srt()),
    }
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            FileManager::write_to_file(path, rendered)?;
            info!("Success: {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

fn normalize_file(path: &Path, format: SubtitleFormat) -> Result<ParsedDocument> {
    let content = FileManager::read_to_string(path)?;
    let document = subtitle_processor::normalize(&content, format);
    debug!("{:?}: {} captions ({})", path, document.len(), format);
    Ok(document)
}

fn run_parse(args: ParseArgs, config: &Config) -> Result<()> {
    let (output_format, pretty) = output_settings(&args.output, config);
    let forced_format = args.format.map(SubtitleFormat::from);

    if args.input_path.is_file() {
        let format = forced_format
            .or_else(|| FileManager::detect_format(&args.input_path))
            .ok_or_else(|| anyhow!(
                "Cannot infer subtitle format from {:?}; pass --format",
                args.input_path
            ))?;

        let document = normalize_file(&args.input_path, format)?;
        let rendered = render(&document, output_format, pretty)?;
        emit(&rendered, args.output.output.as_deref())
    } else if args.input_path.is_dir() {
        if args.output.output.is_some() {
            warn!("--output is ignored for directories; outputs are written next to each input");
        }
        run_parse_folder(&args.input_path, forced_format, output_format, pretty, args.force_overwrite)
    } else {
        Err(anyhow!("Input path does not exist: {:?}", args.input_path))
    }
}

fn run_parse_folder(
    input_dir: &Path,
    forced_format: Option<SubtitleFormat>,
    output_format: OutputFormat,
    pretty: bool,
    force_overwrite: bool,
) -> Result<()> {
    info!("Normalizing subtitles under {:?}", input_dir);

    let files: Vec<(PathBuf, SubtitleFormat)> = FileManager::find_subtitle_files(input_dir)?
        .into_iter()
        .filter(|path| !path.to_string_lossy().ends_with(OutputFormat::Srt.file_suffix()))
        .filter_map(|path| {
            let format = FileManager::detect_format(&path)?;
            match forced_format {
                Some(forced) if forced != format => None,
                _ => Some((path, format)),
            }
        })
        .collect();

    if files.is_empty() {
        warn!("No subtitle files found in {:?}", input_dir);
        return Ok(());
    }

    let progress_bar = ProgressBar::new(files.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("█▓▒░"));

    let mut processed = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for (path, format) in &files {
        progress_bar.set_message(path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());
        let output_path = FileManager::generate_output_path(path, output_format);

        if output_path.exists() && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -F to force overwrite.", output_path);
            skipped += 1;
            progress_bar.inc(1);
            continue;
        }

        let result = normalize_file(path, *format)
            .and_then(|document| render(&document, output_format, pretty))
            .and_then(|rendered| FileManager::write_to_file(&output_path, &rendered));

        match result {
            Ok(()) => processed += 1,
            Err(e) => {
                error!("Error processing {:?}: {:#}", path, e);
                failed += 1;
            }
        }
        progress_bar.inc(1);
    }

    progress_bar.finish_and_clear();
    info!(
        "Finished: {} normalized, {} skipped, {} failed",
        processed, skipped, failed
    );

    Ok(())
}

async fn run_fetch(args: FetchArgs, config: &Config) -> Result<()> {
    let (output_format, pretty) = output_settings(&args.output, config);
    let fetcher = HttpFetcher::new(&config.fetch);

    info!("Fetching {}", args.url);
    let document = fetch_and_normalize(&fetcher, &args.url, args.format.into())
        .await
        .with_context(|| format!("Failed to fetch subtitles from {}", args.url))?;

    let rendered = render(&document, output_format, pretty)?;
    emit(&rendered, args.output.output.as_deref())
}
