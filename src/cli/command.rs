use std::path::PathBuf;

use clap::{Args, Parser as ClapParser, Subcommand, ValueEnum};

use crate::capture::ChannelMap;

#[derive(Debug, ClapParser)]
#[command(
    name       = env!("CARGO_PKG_NAME"),
    version    = env!("CARGO_PKG_VERSION"),
    long_version = crate::LONG_VERSION.as_str(),
    about      = "Decode 4-channel I²S logic captures into per-line PCM dumps",
    long_about = None,
)]
pub struct Cli {
    /// Set the log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,

    /// Refuse to decode without a sample rate (--samplerate).
    #[arg(long, global = true)]
    pub strict: bool,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Show progress bars during operations.
    #[arg(long, global = true)]
    pub progress: bool,

    /// Choose an operation to perform.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode a capture, printing annotations and writing the requested outputs.
    Decode(DecodeArgs),

    /// Decode a capture without writing files and print a summary.
    Info(InfoArgs),
}

#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Raw logic capture, one byte per sample (use "-" for stdin).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Capture sample rate in Hz.
    #[arg(long, value_name = "HZ")]
    pub samplerate: Option<u64>,

    /// Bit position of each signal within a capture byte.
    #[arg(long, value_name = "MAP", default_value_t = ChannelMap::default())]
    pub channel_map: ChannelMap,

    /// Sample index of the first byte in the capture.
    #[arg(long, value_name = "INDEX", default_value_t = 0)]
    pub sample_offset: u64,

    /// Decoder option as key=value (word_length, dump_file, show_log,
    /// wav_preview, wav_line, samplerate_policy). May be repeated.
    #[arg(short = 'O', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub capture: CaptureArgs,

    /// Directory for the ch{0..3}{L,R}.pcm dumps (with dump_file=yes).
    #[arg(long, value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Write DATA records to this YAML file.
    #[arg(long, value_name = "PATH")]
    pub records: Option<PathBuf>,

    /// Write the WAV preview stream to this file (implies wav_preview=yes).
    #[arg(long, value_name = "PATH")]
    pub wav: Option<PathBuf>,

    /// Do not print annotations to stdout.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub capture: CaptureArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Disable logging output.
    Off,
    /// No output except errors.
    Error,
    /// Show warnings and errors.
    Warn,
    /// Show info, warnings and errors (default).
    Info,
    /// Show debug, info, warnings and errors.
    Debug,
    /// Show all log messages including trace.
    Trace,
}

impl LogLevel {
    /// Convert LogLevel to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Colorized human-readable text.
    Plain,
    /// Structured JSON per log record.
    Json,
}
