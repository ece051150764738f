use a2g_core::launches::{DEFAULT_LIMIT, DEFAULT_UPCOMING_LIMIT};
use a2g_core::store::DEFAULT_HISTORY_HOURS;
use a2g_core::{Absence, LaunchFilter, QueryService, Resource, SourcesConfig};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "a2g-cli", version, about = "A2G command center queries")]
struct Cli {
    /// Single-line JSON instead of pretty output
    #[arg(long, global = true)]
    compact: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List launches from the launch provider
    Launches(LaunchesArgs),
    /// Next upcoming launches
    Upcoming {
        #[arg(long, default_value_t = DEFAULT_UPCOMING_LIMIT)]
        limit: u32,
    },
    /// Release counts per status
    Releases,
    /// Observability snapshots
    Observability {
        #[command(subcommand)]
        cmd: ObservabilityCmd,
    },
}

#[derive(Args, Debug)]
struct LaunchesArgs {
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,
    #[arg(long, default_value_t = 0)]
    offset: u32,
    /// Provider status filter
    #[arg(long)]
    status: Option<String>,
    /// Free-text search
    #[arg(long)]
    search: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ObservabilityCmd {
    /// Most recent snapshot
    Latest {
        /// Fail when no snapshot has been synced yet
        #[arg(long)]
        require: bool,
    },
    /// Snapshots from the trailing window, oldest first
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_HOURS)]
        hours: u32,
    },
}

impl Commands {
    fn resource(&self) -> Resource {
        match self {
            Commands::Launches(args) => Resource::Launches(
                LaunchFilter {
                    limit: args.limit,
                    offset: args.offset,
                    status: args.status.clone(),
                    search: args.search.clone(),
                }
                .normalized(),
            ),
            Commands::Upcoming { limit } => Resource::UpcomingLaunches { limit: *limit },
            Commands::Releases => Resource::ReleasesSummary,
            Commands::Observability { cmd } => match cmd {
                ObservabilityCmd::Latest { require } => Resource::LatestObservability(if *require {
                    Absence::NotFound
                } else {
                    Absence::Allowed
                }),
                ObservabilityCmd::History { hours } => {
                    Resource::ObservabilityHistory { hours: *hours }
                }
            },
        }
    }
}

fn needs_store(resource: &Resource) -> bool {
    !matches!(
        resource,
        Resource::Launches(_) | Resource::UpcomingLaunches { .. }
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let sources = SourcesConfig::from_env().context("reading configuration")?;
    println!("{}", run(&cli, &sources).await?);
    Ok(())
}

async fn run(cli: &Cli, sources: &SourcesConfig) -> Result<String> {
    let resource = cli.command.resource();
    let service = QueryService::from_config(sources, needs_store(&resource))?;
    tracing::debug!(?resource, "running query");

    let payload = service.fetch(resource).await?;
    let rendered = if cli.compact {
        serde_json::to_string(&payload)?
    } else {
        serde_json::to_string_pretty(&payload)?
    };
    Ok(rendered)
}
