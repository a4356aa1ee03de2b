use clap::Parser;
use dotenv::dotenv;
use futures::future::join_all;
use github_browse_lib::render::{commit_line, listing_lines, repo_line};
use github_browse_lib::{Args, ClientConfig, Command, CommitOptions, GitHubClient};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::time::Duration;
use tokio::io::{stdout, AsyncWriteExt};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Initialize the tracing logger
    tracing_subscriber::fmt::init();

    dotenv().ok();

    let args = Args::parse();

    let mut config = match &args.api_url {
        Some(url) => ClientConfig::new(url)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    info!("Using GitHub API at {}", config.base_url);

    let client = GitHubClient::new(config)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(80));

    let result = run(&client, args.command, &pb).await;
    pb.finish_and_clear();

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            error!("Command failed: {}", e);
            return Err(e);
        }
    };

    let mut out = stdout();
    out.write_all(&output).await?;
    out.flush().await?;
    Ok(())
}

/// Runs the command and returns what to print, so the spinner is cleared
/// before anything reaches stdout.
async fn run(
    client: &GitHubClient,
    command: Command,
    pb: &ProgressBar,
) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
    let mut output = Vec::new();

    match command {
        Command::Search { query } => {
            pb.set_message(format!("Searching for '{}'", query));
            let repos = client.search_repos(&query).await?;
            for repo in &repos {
                output.extend_from_slice(format!("{}\n", repo_line(repo)).as_bytes());
            }
        }
        Command::Ls { user, repo, reference } => {
            pb.set_message(format!("Listing {}/{} at {}", user, repo, reference));
            let listing = client.list_files(&user, &repo, Some(&reference)).await?;
            for line in listing_lines(&listing) {
                output.extend_from_slice(format!("{}\n", line).as_bytes());
            }
        }
        Command::Log { user, repo, from_ref, path, limit } => {
            pb.set_message(format!("Fetching history of {}/{}", user, repo));
            let options = CommitOptions { from_ref, path };
            let commits = client.get_commits(&user, &repo, &options).await?;
            let shown = limit.unwrap_or(commits.len());
            for commit in commits.iter().take(shown) {
                output.extend_from_slice(format!("{}\n", commit_line(commit)).as_bytes());
            }
        }
        Command::Cat { urls } => {
            pb.set_message(format!("Downloading {} file(s)", urls.len()));
            // Requests run concurrently; output keeps argument order
            let downloads = join_all(urls.iter().map(|url| client.download_file_bytes(url))).await;
            for content in downloads {
                output.extend_from_slice(&content?);
            }
        }
        Command::Show { user, repo, path, reference } => {
            pb.set_message(format!("Fetching {} from {}/{}", path, user, repo));
            output = client
                .retrieve_file(&user, &repo, &path, Some(&reference))
                .await?;
        }
    }

    Ok(output)
}
