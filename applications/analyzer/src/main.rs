use clap::{Parser, Subcommand};
use mixdesk_analyzer::{commands, AnalyzerConfig};
use mixdesk_core::CancellationToken;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "mixdesk-analyzer")]
#[command(about = "Loudness and container header analysis for audio versions", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (default: ./mixdesk.toml if present)
    #[arg(short, long, global = true, env = "MIXDESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pipeline and print the metadata record as JSON
    Analyze {
        /// HTTP(S) URL or local file path
        source: String,

        /// Original file name, used for the format fallback
        #[arg(short, long)]
        name: Option<String>,

        /// Audio version identifier
        #[arg(long, default_value = "local")]
        version_id: String,
    },

    /// Print the container header fields and MIME type of a local file as JSON
    Header {
        path: PathBuf,
    },

    /// Print the integrated loudness of a local file
    Loudness {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AnalyzerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing on stderr so stdout carries only results
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, cancelling");
            ctrl_c.cancel();
        }
    });

    match cli.command {
        Commands::Analyze {
            source,
            name,
            version_id,
        } => {
            let record =
                commands::analyze(&config, &source, name.as_deref(), &version_id, &cancel).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Header { path } => {
            let report = commands::header(&path).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Loudness { path } => {
            let lufs = commands::loudness(&path, &cancel).await?;
            println!("{}", commands::format_lufs(lufs));
        }
    }

    Ok(())
}
