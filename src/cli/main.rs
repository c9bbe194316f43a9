mod render;

use clap::{Args, Parser, Subcommand};
use foi_search::config::{Config, ObservabilityConfig};
use foi_search::search::{
    load_authors, load_producers, load_year_totals, parse_request_ref, FilterState, PageSize,
};
use foi_search::{ApiError, DetailView, FoiApi, FoiError, HttpFoiClient, SearchController};
use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use render::{render_detail, render_list, render_results, render_years, SearchView};

#[derive(Parser)]
#[command(name = "foi-search", version)]
#[command(about = "Search Freedom of Information requests", long_about = None)]
struct Cli {
    /// API base URL (overrides the configured one)
    #[arg(short, long, env = "FOI_API_URL")]
    api_url: Option<String>,

    /// Configuration file
    #[arg(short, long, env = "FOI_CONFIG_PATH", default_value = "config/foi-search.toml")]
    config: String,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Words in the request title
    #[arg(short, long)]
    title: Option<String>,

    /// Authoring department
    #[arg(short, long)]
    author: Option<String>,

    /// Producing department
    #[arg(short = 'P', long)]
    producer: Option<String>,

    /// Words in the request body
    #[arg(long)]
    request_text: Option<String>,

    /// Words in the response body
    #[arg(long)]
    response_text: Option<String>,

    /// Published on or after (YYYY/MM/DD)
    #[arg(long)]
    start_date: Option<String>,

    /// Published on or before (YYYY/MM/DD)
    #[arg(long)]
    end_date: Option<String>,

    /// Published during this year; replaces --start-date/--end-date
    #[arg(short, long)]
    year: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> FilterState {
        let mut filter = FilterState {
            title: self.title,
            author: self.author,
            producer: self.producer,
            request_text: self.request_text,
            response_text: self.response_text,
            start_date: self.start_date,
            end_date: self.end_date,
            selected_year: None,
        };
        if let Some(year) = self.year {
            filter.select_year(year);
        }
        filter
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search requests and print one page of results
    Search {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page to show
        #[arg(short = 'n', long, default_value = "1")]
        page: u32,

        /// Items per page (5, 10, 15, 20, 30 ... 100)
        #[arg(short, long)]
        limit: Option<PageSize>,

        /// One line per result
        #[arg(long)]
        compact: bool,
    },

    /// Page through results interactively
    Browse {
        #[command(flatten)]
        filters: FilterArgs,

        /// Items per page (5, 10, 15, 20, 30 ... 100)
        #[arg(short, long)]
        limit: Option<PageSize>,

        /// One line per result
        #[arg(long)]
        compact: bool,
    },

    /// Show a single request
    Show {
        /// Numeric request id, or a page link carrying `?id=`
        #[arg(value_name = "REQUEST")]
        request: String,
    },

    /// List authoring departments
    Authors,

    /// List producing departments
    Producers,

    /// Published requests per year
    Years,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load_from(&cli.config).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });
    if let Some(url) = cli.api_url {
        config.api.url = url;
    }

    init_tracing(&config.observability);
    tracing::debug!(api_url = %config.api.url, "Starting foi-search v{}", env!("CARGO_PKG_VERSION"));

    let client: Arc<dyn FoiApi> = match HttpFoiClient::new(&config.api) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("{}", e);
            return Ok(exit_with(&e));
        }
    };
    let json = cli.json;

    match cli.command {
        Commands::Search {
            filters,
            page,
            limit,
            compact,
        } => {
            let mut search =
                SearchController::with_limit(client, limit.unwrap_or(config.search.limit));
            search.set_filter(filters.into_filter());
            search.search().await;

            if page != 1 && search.failure().is_none() {
                if let Err(e) = search.set_page(page).await {
                    let err = FoiError::from(e);
                    eprintln!("{}", err);
                    return Ok(exit_with(&err));
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&SearchView::of(&search))?);
            } else {
                print!("{}", render_results(&search, compact));
            }

            if let Some(failure) = search.failure() {
                return Ok(exit_on_api(failure));
            }
        }

        Commands::Browse {
            filters,
            limit,
            compact,
        } => {
            let mut search =
                SearchController::with_limit(client.clone(), limit.unwrap_or(config.search.limit));
            search.set_filter(filters.into_filter());
            let mut detail = DetailView::new(client);

            browse(&mut search, &mut detail, compact).await?;
        }

        Commands::Show { request } => {
            let Some(id) = parse_request_ref(&request) else {
                let err = FoiError::Validation(format!("Not a request id: {}", request));
                eprintln!("{}", err);
                return Ok(exit_with(&err));
            };

            let mut detail = DetailView::new(client);
            detail.open_and_load(id).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&detail.detail())?);
            } else {
                print!("{}", render_detail(&detail));
            }

            if let Some(failure) = detail.failure() {
                return Ok(exit_on_api(failure));
            }
        }

        Commands::Authors => {
            let section = load_authors(client.as_ref()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&section)?);
            } else {
                print!("{}", render_list(&section));
            }
            if let Some(failure) = &section.failure {
                return Ok(exit_on_api(failure));
            }
        }

        Commands::Producers => {
            let section = load_producers(client.as_ref()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&section)?);
            } else {
                print!("{}", render_list(&section));
            }
            if let Some(failure) = &section.failure {
                return Ok(exit_on_api(failure));
            }
        }

        Commands::Years => {
            let section = load_year_totals(client.as_ref()).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&section)?);
            } else {
                print!("{}", render_years(&section));
            }
            if let Some(failure) = &section.failure {
                return Ok(exit_on_api(failure));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

const BROWSE_HELP: &str =
    "[n]ext  [p]rev  [g N] go to page  [l N] items per page  [o ID] open  [s]earch again  [q]uit";

async fn browse(
    search: &mut SearchController,
    detail: &mut DetailView,
    compact: bool,
) -> anyhow::Result<()> {
    search.search().await;
    print!("{}", render_results(search, compact));
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
        let argument = argument.trim();

        match command {
            "" => {}
            "q" | "quit" => break,
            "n" | "next" => {
                if let Err(e) = search.next_page().await {
                    println!("! {}", e);
                }
            }
            "p" | "prev" => {
                if let Err(e) = search.previous_page().await {
                    println!("! {}", e);
                }
            }
            "g" | "go" => {
                // the jump error is shown by render_results
                let _ = search.jump_to_page(argument).await;
            }
            "l" | "limit" => match argument.parse::<u32>() {
                Ok(limit) => {
                    if let Err(e) = search.set_limit(limit).await {
                        println!("! {}", e);
                    }
                }
                Err(_) => println!("! Not a number"),
            },
            "o" | "open" => {
                match parse_request_ref(argument) {
                    Some(id) => {
                        detail.open_and_load(id).await;
                        print!("{}", render_detail(detail));
                        detail.close();
                    }
                    None => println!("! Not a request id: {}", argument),
                }
                prompt()?;
                continue;
            }
            "s" | "search" => search.search().await,
            _ => println!("{}", BROWSE_HELP),
        }

        print!("{}", render_results(search, compact));
        prompt()?;
    }

    Ok(())
}

fn exit_with(err: &FoiError) -> ExitCode {
    ExitCode::from(err.exit_code())
}

/// Exit status for an API failure the rendered output already shows
fn exit_on_api(failure: &ApiError) -> ExitCode {
    exit_with(&FoiError::Api(failure.clone()))
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("foi_search={}", config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
