use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use fleet_admin::{FleetBackend, commands};
use infrastructure::{BackendKind, FleetConfig, GeneratorOptions};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Robot fleet data administration", long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override the configured backend
    #[arg(long)]
    backend: Option<BackendKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the schema (SQLite migrations or the DynamoDB table)
    Init,
    /// Generate and store a demo fleet
    Seed {
        #[arg(long, default_value_t = 10)]
        robots: usize,
        /// Hours of sensor history per robot
        #[arg(long, default_value_t = 24)]
        hours: i64,
    },
    /// Print fleet statistics
    Stats,
    /// List robots
    Robots,
    /// Print the health summary of one robot
    Health { robot_id: String },
    /// Record a battery level, raising alerts per the configured thresholds
    Battery { robot_id: String, level: f64 },
    /// Copy every record from one backend into another
    Migrate {
        #[arg(long)]
        from: BackendKind,
        #[arg(long)]
        to: BackendKind,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,fleet_admin=debug,application=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = FleetConfig::load(&args.config_dir)?;
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    info!(backend = ?config.backend, "🤖 Fleet admin starting");

    let source_kind = match &args.command {
        Command::Migrate { from, .. } => *from,
        _ => config.backend,
    };
    let backend = FleetBackend::open_as(&config, source_kind).await?;

    match args.command {
        Command::Init => backend.init().await?,
        Command::Seed { robots, hours } => {
            let options = GeneratorOptions {
                robots,
                sensor_hours: hours,
                ..GeneratorOptions::default()
            }
            .with_camera_config(&config.camera);
            let store = backend.into_store();
            let written = commands::seed(store.clone(), &options).await?;
            info!(records = written, "✅ Fleet seeded");

            let stats = commands::stats(store).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Stats => {
            let stats = commands::stats(backend.into_store()).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Robots => {
            let robots = commands::robots(backend.into_store()).await?;
            print!("{}", commands::robot_table(&robots));
        }
        Command::Health { robot_id } => {
            let summary = commands::health(backend.into_store(), &robot_id).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Battery { robot_id, level } => {
            let policy = config.alerts.battery_policy();
            let summary = commands::battery(backend.into_store(), policy, &robot_id, level).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Migrate { from, to } => {
            anyhow::ensure!(from != to, "--from and --to name the same backend");
            let target = FleetBackend::open_as(&config, to).await?;
            target.init().await?;
            let target = target.into_store();

            let copied = commands::migrate(backend.into_store(), target.clone()).await?;
            info!(records = copied, ?from, ?to, "✅ Fleet migrated");

            let stats = commands::stats(target).await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
