use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use weft_cli::{commands, OutputFormat};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an intent and stream the execution feed
    Submit {
        /// Natural-language intent text
        text: String,
        #[arg(long, help = "Run the pipeline without stage delays")]
        instant: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run the canonical DAO-proposal walkthrough
    Demo {
        #[arg(long, help = "Run the pipeline without stage delays")]
        instant: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the pipeline an intent resolves to
    Spec {
        /// Natural-language intent text
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("default subscriber");

    match cli.command {
        Commands::Submit {
            text,
            instant,
            format,
        } => commands::cmd_submit(&text, instant, format)?,
        Commands::Demo { instant, format } => commands::cmd_submit("deploy a dao", instant, format)?,
        Commands::Spec { text } => commands::cmd_spec(&text)?,
    }

    Ok(())
}
