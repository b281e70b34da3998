//! Line-driven terminal client entry point.
mod app;
mod config;
mod input;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::CliApp;
use config::CliConfig;
use game_content::{ContentFactory, MapLoader, bundled};
use runtime::{Runtime, RuntimeConfig, Scenario};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();

    // Setup logging to a per-session file; stdout belongs to the game
    setup_logging(&config.session_id)?;

    let runtime = build_runtime(&config).await?;
    CliApp::new(runtime).run().await
}

/// Loads content from `data_dir` when configured, bundled content otherwise.
async fn build_runtime(config: &CliConfig) -> Result<Runtime> {
    let (registry, mut game_config, map) = match &config.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let map = config
                .map
                .as_deref()
                .map(|name| factory.load_map(name))
                .transpose()?;
            (factory.load_registry()?, factory.load_config()?, map)
        }
        None => {
            let map = config.map.as_deref().map(bundled::map).transpose()?;
            (bundled::registry()?, bundled::config()?, map)
        }
    };

    if let Some(map) = &map {
        MapLoader::validate(&map.map, &registry.tiles)?;
    }

    if let Some(seed) = config.seed {
        game_config.seed = Some(seed);
    }
    let scenario = map.map_or_else(Scenario::sandbox, Scenario::from_map);

    let mut runtime_config = RuntimeConfig {
        game_config,
        ..RuntimeConfig::default()
    };
    if let Some(turns) = config.turns_per_step {
        runtime_config.turns_per_step = turns;
    }

    tracing::info!(
        data_dir = ?config.data_dir,
        map = config.map.as_deref().unwrap_or("sandbox"),
        "starting runtime"
    );

    Runtime::builder()
        .config(runtime_config)
        .registry(registry)
        .scenario(scenario)
        .build()
        .await
        .context("failed to start the runtime")
}

/// Setup logging to a session file
fn setup_logging(session_id: &Option<String>) -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let log_dir = get_log_directory();

    // Create session ID if not provided
    let session_id = match session_id {
        Some(id) => id.clone(),
        None => {
            let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            format!("session_{}", timestamp)
        }
    };

    // Create session-specific log directory
    let session_log_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(())
}

/// Get the platform-specific log directory
fn get_log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "rogue")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("rogue").join("logs"))
}
