use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hubscout_api::{HubClient, PapersClient, RelayClient, SubscribeClient};
use hubscout_cache::prefs::TIME_FRAME_KEY;
use hubscout_cache::PrefsStore;
use hubscout_core::models::{ContentType, TimeFrame};
use hubscout_core::source::{PapersSource, TrendingSource};
use hubscout_core::{Config, HubProvider};
use hubscout_server::AppState;
use hubscout_tui::{App, DashboardClient};

#[derive(Parser)]
#[command(name = "hubscout")]
#[command(version, about = "Terminal dashboard for trending Hugging Face content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the aggregation endpoints
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,
        /// Override the configured bind port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Browse trending content in the terminal dashboard
    Browse {
        /// Base URL of the aggregation endpoints
        #[arg(long)]
        server_url: Option<String>,
    },
    /// Print one trending list and exit
    Trending {
        /// papers, models, datasets, spaces or all
        kind: String,

        /// How many entries to ask for
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Papers time range: today, three_days, week or month
        #[arg(long, default_value = "three_days")]
        time_frame: String,

        /// Emit JSON instead of a plain listing
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hubscout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            let mut server_config = config.server.clone();
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }

            let provider = Arc::new(hub_provider(&config));
            let state = AppState::new(provider.clone(), provider, &server_config);
            hubscout_server::serve(state, &server_config.bind_addr()).await
        }
        Some(Commands::Browse { server_url }) => {
            let prefs = open_prefs();
            let time_frame = saved_time_frame(prefs.as_ref())
                .unwrap_or(config.client.default_time_frame);

            let base_url = server_url.unwrap_or_else(|| config.client.server_url.clone());
            let fetcher = Arc::new(DashboardClient::new(base_url));
            let subscribe = config
                .client
                .subscribe_url
                .clone()
                .map(SubscribeClient::new);

            let app = App::new(time_frame, config.client.limit, subscribe.is_some());
            hubscout_tui::run_tui(app, fetcher, subscribe, prefs).await
        }
        Some(Commands::Trending {
            kind,
            limit,
            time_frame,
            json,
        }) => {
            let time_frame: TimeFrame = time_frame.parse()?;
            let provider = hub_provider(&config);

            if kind == "all" {
                let (papers, models, datasets, spaces) = futures::join!(
                    provider.papers(time_frame),
                    provider.trending_models(limit),
                    provider.trending_datasets(limit),
                    provider.trending_spaces(limit),
                );
                print_papers(papers?, json)?;
                print_models(models?, json)?;
                print_datasets(datasets?, json)?;
                print_spaces(spaces?, json)?;
                return Ok(());
            }

            match kind.parse::<ContentType>()? {
                ContentType::Papers => print_papers(provider.papers(time_frame).await?, json)?,
                ContentType::Models => print_models(provider.trending_models(limit).await?, json)?,
                ContentType::Datasets => {
                    print_datasets(provider.trending_datasets(limit).await?, json)?
                }
                ContentType::Spaces => print_spaces(provider.trending_spaces(limit).await?, json)?,
            }
            Ok(())
        }
        None => {
            println!("No command specified. Try --help");
            Ok(())
        }
    }
}

fn hub_provider(config: &Config) -> HubProvider {
    let relay = RelayClient::with_base_url(config.relay.url.clone());
    HubProvider::new(
        HubClient::with_base_url(relay.clone(), config.hub.api_url.clone()),
        PapersClient::with_base_url(relay, config.hub.api_url.clone()),
    )
}

fn open_prefs() -> Option<PrefsStore> {
    let path = match Config::prefs_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("no preference store available: {}", e);
            return None;
        }
    };

    match PrefsStore::open(&path) {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!("failed to open preference store: {}", e);
            None
        }
    }
}

fn saved_time_frame(prefs: Option<&PrefsStore>) -> Option<TimeFrame> {
    prefs
        .and_then(|store| store.get(TIME_FRAME_KEY).ok().flatten())
        .and_then(|value| value.parse().ok())
}

fn print_papers(papers: Vec<hubscout_core::PaperRecord>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&papers)?);
        return Ok(());
    }

    println!("Trending papers:");
    for (i, paper) in papers.iter().enumerate() {
        println!(
            "{:>3}. {}  (▲{} 💬{} by {})",
            i + 1,
            paper.title,
            paper.upvotes,
            paper.comments,
            paper.submitted_by
        );
        println!("     {}", paper.link);
    }
    Ok(())
}

fn print_models(models: Vec<hubscout_core::ModelRecord>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    println!("Trending models:");
    for (i, model) in models.iter().enumerate() {
        println!(
            "{:>3}. {:<45} ⬇{:<10} ❤{:<7} {}",
            i + 1,
            model.model_id,
            model.downloads,
            model.likes,
            model.pipeline_tag.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn print_datasets(datasets: Vec<hubscout_core::DatasetRecord>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&datasets)?);
        return Ok(());
    }

    println!("Trending datasets:");
    for (i, dataset) in datasets.iter().enumerate() {
        println!(
            "{:>3}. {:<45} ⬇{:<10} ❤{:<7} {}",
            i + 1,
            dataset.dataset_id,
            dataset.downloads,
            dataset.likes,
            dataset.modalities.join(",")
        );
    }
    Ok(())
}

fn print_spaces(spaces: Vec<hubscout_core::SpaceRecord>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&spaces)?);
        return Ok(());
    }

    println!("Trending spaces:");
    for (i, space) in spaces.iter().enumerate() {
        println!(
            "{:>3}. {} {:<40} ❤{:<7} {}",
            i + 1,
            space.emoji.as_deref().unwrap_or("🚀"),
            space.title,
            space.likes,
            space.primary_domain.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
