use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use baras_report::{PageRequest, ResultsPage, SnapshotSession, load_config};
use baras_report_types::{CharacterProfile, TabId};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Render a combat report results page from a snapshot")]
struct Cli {
    /// Report snapshot (JSON) to render
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Tab to show; the overview when omitted
    #[arg(short, long)]
    tab: Option<String>,

    #[arg(long)]
    premium: bool,

    /// TOML config file; the default config location when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exclude boss downtime from statistics
    #[arg(long)]
    downtime: bool,

    #[arg(long)]
    pretty: bool,

    /// Wait for lazily loaded views and render again
    #[arg(long)]
    wait_views: bool,

    /// Armory region of the selected character
    #[arg(long, requires = "thumbnail")]
    region: Option<String>,

    /// Armory thumbnail path of the selected character
    #[arg(long, requires = "region")]
    thumbnail: Option<String>,

    /// Prefix for tab links in the header
    #[arg(long, default_value = "")]
    url_prefix: String,

    /// Simulated latency for lazily loaded views
    #[arg(long, default_value_t = 0)]
    view_delay_ms: u64,
}

impl Cli {
    fn page_request(&self) -> PageRequest {
        let character_profile = match (&self.region, &self.thumbnail) {
            (Some(region), Some(thumbnail)) => Some(CharacterProfile {
                region: region.clone(),
                thumbnail: thumbnail.clone(),
            }),
            _ => None,
        };
        PageRequest {
            selected_tab: self.tab.as_deref().map(TabId::from),
            premium: self.premium,
            character_profile,
            tab_url_prefix: self.url_prefix.clone(),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If BARAS_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("BARAS_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    // stdout carries the rendered tree, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_logging();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let session = SnapshotSession::load(&cli.snapshot).map_err(|e| e.to_string())?;
    tracing::info!(
        snapshot = %cli.snapshot.display(),
        fight = %session.snapshot().fight.name,
        "Loaded snapshot"
    );

    let fetcher = session.view_fetcher(Duration::from_millis(cli.view_delay_ms));
    let resident = session.resident_views();
    let page = ResultsPage::new(Arc::new(session), config, fetcher, resident);
    page.set_adjust_for_downtime(cli.downtime);

    let request = cli.page_request();
    let mut tree = page.render(&request).map_err(|e| e.to_string())?;
    if cli.wait_views {
        page.views().wait_idle().await;
        tree = page.render(&request).map_err(|e| e.to_string())?;
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&tree)
    } else {
        serde_json::to_string(&tree)
    }
    .map_err(|e| e.to_string())?;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{json}").map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())?;
    Ok(())
}
