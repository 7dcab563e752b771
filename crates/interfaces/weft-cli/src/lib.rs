pub mod commands;

use clap::ValueEnum;

#[derive(ValueEnum, Clone, Debug, Copy)]
pub enum OutputFormat {
    /// Human-readable feed lines
    Text,
    /// One JSON object per event
    Json,
}
