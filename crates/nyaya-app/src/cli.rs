use clap::Parser;

/// Nyaya — an AI legal assistant for Indian law, in the terminal.
#[derive(Parser, Debug)]
#[command(name = "nyaya", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Directory for session storage (overrides config).
    #[arg(short = 'd', long)]
    pub data_dir: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
