use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stockpile")]
#[command(author, version, about = "Inventory management service with photo storage")]
pub struct Cli {
    /// Host address to bind to
    #[arg(long)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long)]
    pub port: u16,

    /// Path to the photo cache directory
    #[arg(short, long)]
    pub cache: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
