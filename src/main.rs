use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "bbsource")]
#[command(about = "Release and repository metadata for Bitbucket-hosted packages")]
#[command(version)]
struct Cli {
    /// Use this config file instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve downloadable releases (null: not Bitbucket, false: no releases)
    DownloadInfo {
        /// Repository, branch (/src/{branch}) or tags (#tags) URL
        url: String,
        /// Only consider tags starting with this prefix
        #[arg(short = 'p', long)]
        tag_prefix: Option<String>,
        /// Report at most this many tag releases (0 = unlimited)
        #[arg(short = 'm', long)]
        max_releases: Option<usize>,
    },
    /// Resolve repository metadata (null: not Bitbucket)
    RepoInfo {
        /// Repository or branch URL
        url: String,
    },
    /// Derive the tags and branch web URLs of a repository (offline)
    Urls {
        /// Bare repository URL
        repo_url: String,
        /// Branch to link to
        #[arg(short, long)]
        branch: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::DownloadInfo {
            url,
            tag_prefix,
            max_releases,
        } => {
            cli::download_info::run(
                cli::download_info::DownloadInfoOptions {
                    url,
                    tag_prefix,
                    max_releases,
                },
                config_path,
            )
            .await
        }
        Commands::RepoInfo { url } => cli::repo_info::run(url, config_path).await,
        Commands::Urls { repo_url, branch } => cli::urls::run(repo_url, branch),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
