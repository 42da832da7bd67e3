use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::DateTime;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dkc_api::{ApiResponse, DkcApi, MasterKey, Page, StockQuery};

/// Query the DKC API from the command line
#[derive(Debug, Parser)]
#[command(name = "dkc-api", version, about)]
struct Cli {
    /// Master key issued by DKC
    #[arg(long, env = "DKC_MASTER_KEY", hide_env_values = true)]
    master_key: String,

    /// API base URL
    #[arg(long, env = "DKC_BASE_URL")]
    base_url: Option<String>,

    /// Directory holding the cached access token
    #[arg(long, default_value = ".")]
    token_dir: PathBuf,

    /// Trace request URLs and header names
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Feed {
    Company,
    Community,
    Products,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Make sure the cached token is accepted, refreshing it if not
    Token,
    /// Catalog card for a material code
    Material { code: String },
    /// Stock levels; no filters means every material
    Stock {
        #[arg(long = "code")]
        codes: Vec<String>,
        #[arg(long = "id")]
        ids: Vec<String>,
    },
    /// A page of one of the news feeds
    News {
        #[arg(value_enum)]
        feed: Feed,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        length: u32,
    },
    /// Pending revision size since a unix timestamp
    RevisionSize {
        #[arg(long)]
        since: Option<i64>,
    },
    /// Download a stored file by id
    File { id: i64 },
}

fn init_tracing(debug: bool) {
    let default = if debug { "dkc_api=debug,dkc_auth=debug,dkc_resources=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_response<T: Serialize>(response: ApiResponse<T>) -> Result<()> {
    match response {
        ApiResponse::Success(data) => {
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        ApiResponse::Error(e) => bail!("API error {}: {}", e.code, e.message),
        ApiResponse::ErrorAlternative(e) => bail!("API error {}: {}", e.error_code, e.error_message),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut builder = DkcApi::builder(MasterKey::new(cli.master_key))
        .token_file(&cli.token_dir, dkc_auth::config::DEFAULT_TOKEN_FILE)
        .debug(cli.debug);
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    let mut api = builder.build().await.context("Could not authenticate against the DKC API")?;
    info!(state = ?api.state(), "Session established");

    match cli.command {
        Command::Token => {
            api.ensure_valid().await?;
            println!("Access token is valid");
        }
        Command::Material { code } => print_response(api.catalog().get_material(&code).await?)?,
        Command::Stock { codes, ids } => {
            let query = StockQuery::all().codes(codes).ids(ids);
            print_response(api.catalog().get_material_stock(&query).await?)?
        }
        Command::News { feed, page, length } => {
            let page = Page::new(page, length);
            let news = api.news();
            match feed {
                Feed::Company => print_response(news.get_news_company(page).await?)?,
                Feed::Community => print_response(news.get_news_community(page).await?)?,
                Feed::Products => print_response(news.get_news_products(page).await?)?,
            }
        }
        Command::RevisionSize { since } => {
            let since = since
                .map(|secs| DateTime::from_timestamp(secs, 0).context("Timestamp out of range"))
                .transpose()?;
            print_response(api.content().get_revisions_last_size(since).await?)?
        }
        Command::File { id } => print_response(api.content().get_file(id).await?)?,
    }

    Ok(())
}
