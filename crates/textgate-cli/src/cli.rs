use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "textgate", version, about = "Validation boundary for untrusted LLM input")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "textgate.yaml")]
    pub config: PathBuf,

    /// Which policy to run the input through
    #[arg(short, long, value_enum, default_value = "validate")]
    pub mode: Mode,

    /// Treat the input as a search query (shorter limit, no injection check)
    #[arg(short, long)]
    pub query: bool,

    /// Maximum accepted length in codepoints (overrides config file setting)
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Text to check; read from stdin when omitted
    pub text: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Hard accept/reject verdict
    Validate,
    /// Best-effort cleaned text only
    Sanitize,
    /// Always-usable text plus advisory warnings
    Soft,
}
