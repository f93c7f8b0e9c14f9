use clap::Parser;
use hews::api::Category;
use hews::core::config::{self, HewsConfig};
use hews::core::route::Route;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;

#[derive(Parser)]
#[command(name = "hews", about = "Read Hacker News in the terminal")]
struct Args {
    /// Screen to open, e.g. `/new`, `/post?id=8863`, `/user?id=pg`
    route: Option<String>,

    /// Front page category (overrides config and HEWS_CATEGORY)
    #[arg(short, long, value_enum)]
    category: Option<Category>,

    /// API base URL (overrides config and HEWS_API_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to hews.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("hews.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            HewsConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.category, args.base_url.as_deref());

    let route = match args.route.as_deref() {
        Some(raw) => Route::parse(raw).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("unknown route: {raw}"))
        })?,
        None => Route::Stories(resolved.category),
    };

    log::info!(
        "Hews starting up: route={}, api={}",
        route,
        resolved.base_url
    );

    hews::tui::run(resolved, route)
}
