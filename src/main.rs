use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use sidebar_recentchanges::config::SidebarConfig;
use sidebar_recentchanges::http::{HttpRequest, HttpTransport, ReqwestTransport};
use sidebar_recentchanges::logging;
use sidebar_recentchanges::sidebar::{SidebarWidget, StaticPage};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Render the recent-changes sidebar for a wiki page
#[derive(Parser, Debug)]
#[command(name = "sidebar-recentchanges")]
#[command(version)]
struct Args {
    /// Host page HTML: a file path or an http(s) URL
    #[arg(long)]
    page: String,

    /// Wiki script path (wgScriptPath), e.g. https://wiki.example/w
    #[arg(long, env = "MW_SCRIPT_PATH")]
    script_path: Option<String>,

    /// Article path pattern (wgArticlePath), e.g. /wiki/$1
    #[arg(long)]
    article_path: Option<String>,

    /// Skin name; detected from the page's body classes when omitted
    #[arg(long)]
    skin: Option<String>,

    /// Config file (default: <config dir>/sidebar-recentchanges/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretend the page defines a sidebar toggle handler
    #[arg(long)]
    toggle_handler: bool,

    /// Keep running and deliver a visibility event every N seconds
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = SidebarConfig::load_or_default(args.config.as_deref())
        .context("Failed to load sidebar config")?;

    let Some(script_path) = args.script_path.clone().or_else(|| config.script_path.clone()) else {
        bail!("no script path given (--script-path, MW_SCRIPT_PATH or script_path in config)");
    };
    let article_path = args.article_path.clone().unwrap_or_else(|| config.article_path.clone());

    let transport = ReqwestTransport::new();
    let html = load_page(&transport, &args.page).await?;

    let mut widget = SidebarWidget::new(&config);
    let mut host = StaticPage::new(&html, script_path, article_path)
        .with_skin(args.skin.clone().or_else(|| config.skin.clone()), widget.skins())
        .with_toggle_handler(args.toggle_handler);

    widget.on_load(&mut host, &transport, Utc::now()).await;
    print_page(&host);

    let Some(secs) = args.watch else {
        return Ok(());
    };

    info!("Watching, visibility event every {}s", secs);
    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if widget.on_visibility_change(&mut host, &transport, false, Utc::now()).await {
                    print_page(&host);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping");
                return Ok(());
            }
        }
    }
}

async fn load_page(transport: &dyn HttpTransport, page: &str) -> Result<String> {
    if page.starts_with("http://") || page.starts_with("https://") {
        let response = transport
            .execute(HttpRequest::get(page))
            .await
            .with_context(|| format!("Failed to fetch {}", page))?
            .error_for_status(page)?;
        Ok(response.body)
    } else {
        std::fs::read_to_string(page).with_context(|| format!("Failed to read {}", page))
    }
}

fn print_page(host: &StaticPage) {
    for menu in host.menus() {
        println!("<!-- {} -->", menu.target);
        println!("{}", menu.html);
    }
    if let Some(slot) = host.slot_html() {
        println!("<!-- .recent-changes-js -->");
        println!("{}", slot);
    }
}
