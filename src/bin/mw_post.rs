//! Wiki publish step
//!
//! Fetches one file from the current repository and ref through the GitHub
//! contents API and saves it as a wiki page, using the token and cookie
//! produced by `mw-login`.
//!
//! # Usage
//! ```bash
//! MW_API=https://wiki.example/w/api.php \
//! MW_CSRF_TOKEN=... MW_COOKIE=... GITHUB_TOKEN=... \
//! MW_TARGET_PAGE='MediaWiki:Gadget-sidebarRecentChanges.js' \
//! GITHUB_TARGET_DIR=src/sidebarRecentChanges.js \
//! mw-post
//! ```

use anyhow::Result;
use clap::Parser;
use sidebar_recentchanges::config::PublishInputs;
use sidebar_recentchanges::http::ReqwestTransport;
use sidebar_recentchanges::{logging, publish};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "mw-post")]
#[command(about = "Publish a repository file to a MediaWiki page")]
#[command(version)]
struct Args {
    /// Action API endpoint
    #[arg(long, env = "MW_API")]
    api: Option<String>,

    /// CSRF token from mw-login
    #[arg(long, env = "MW_CSRF_TOKEN", hide_env_values = true)]
    csrf_token: Option<String>,

    /// Cookie header from mw-login
    #[arg(long, env = "MW_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    /// Token for the GitHub contents API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Wiki page to overwrite
    #[arg(long, env = "MW_TARGET_PAGE")]
    page: Option<String>,

    /// Repository path of the file to publish
    #[arg(long, env = "GITHUB_TARGET_DIR")]
    path: Option<String>,

    /// owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Branch or ref to read from
    #[arg(long = "ref", env = "GITHUB_REF")]
    git_ref: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    github_api: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let inputs = PublishInputs {
        api: args.api,
        csrf_token: args.csrf_token,
        cookie: args.cookie,
        github_token: args.github_token,
        target_page: args.page,
        target_path: args.path,
        repository: args.repository,
        git_ref: args.git_ref,
        github_api: args.github_api,
    };

    let transport = ReqwestTransport::new();
    let result = publish::publish(&transport, inputs).await?;

    match result.new_revision {
        Some(rev) => info!("✅ Page edited successfully (revision {})", rev),
        None => info!("✅ Page edited successfully"),
    }
    Ok(())
}
