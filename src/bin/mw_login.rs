//! Wiki login step
//!
//! Logs a bot account in to a MediaWiki action API and emits the CSRF token
//! and session cookie as step outputs for `mw-post`.
//!
//! # Usage
//! ```bash
//! MW_API=https://wiki.example/w/api.php \
//! MW_USERNAME='Bot@ci' \
//! MW_PASSWORD=... \
//! mw-login
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use sidebar_recentchanges::actions::OutputSink;
use sidebar_recentchanges::config::LoginInputs;
use sidebar_recentchanges::http::ReqwestTransport;
use sidebar_recentchanges::{logging, wiki};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "mw-login")]
#[command(about = "Log in to a MediaWiki API and emit a CSRF token and cookie")]
#[command(version)]
struct Args {
    /// Action API endpoint, e.g. https://wiki.example/w/api.php
    #[arg(long, env = "MW_API")]
    api: Option<String>,

    /// Bot username
    #[arg(long, env = "MW_USERNAME")]
    username: Option<String>,

    /// Bot password
    #[arg(long, env = "MW_PASSWORD", hide_env_values = true)]
    password: Option<String>,

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
    let inputs = LoginInputs {
        api: args.api,
        username: args.username,
        password: args.password,
    };

    let transport = ReqwestTransport::new();
    let outcome = wiki::login(&transport, inputs).await?;

    let sink = OutputSink::from_env();
    sink.set_output("token", &outcome.csrf_token)
        .context("Failed to write token output")?;
    sink.set_output("cookie", &outcome.cookie)
        .context("Failed to write cookie output")?;

    info!("✅ CSRF token and cookie emitted");
    Ok(())
}
