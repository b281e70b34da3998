//! CLI configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Configuration required to bootstrap the runtime and the line client.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Directory holding `config.toml`, `tiles.ron`, `entities.ron` and
    /// `maps/`. Bundled content is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Map to load instead of the sandbox.
    pub map: Option<String>,
    pub seed: Option<u64>,
    pub session_id: Option<String>,
    pub turns_per_step: Option<u32>,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ROGUE_DATA_DIR` - Content directory (default: bundled content)
    /// - `ROGUE_MAP` - Map name under `maps/` (default: sandbox)
    /// - `ROGUE_SEED` - World seed (default: random)
    /// - `ROGUE_SESSION` - Session identifier for log files (default: timestamp)
    /// - `ROGUE_TURNS_PER_STEP` - Turn bound per command (default: runtime's)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("ROGUE_DATA_DIR").ok().map(PathBuf::from),
            map: env::var("ROGUE_MAP").ok().filter(|name| !name.is_empty()),
            seed: read_env::<u64>("ROGUE_SEED"),
            session_id: env::var("ROGUE_SESSION").ok(),
            turns_per_step: read_env::<u32>("ROGUE_TURNS_PER_STEP").map(|turns| turns.max(1)),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
