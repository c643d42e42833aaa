use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use urania::ChartSettings;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "URANIA_CONFIG";

const CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartSettings>,
}

/// Try `URANIA_CONFIG`, then common relative paths for `configs/urania.toml`.
pub fn read_config_text() -> anyhow::Result<(PathBuf, String)> {
    if let Ok(explicit) = env::var(CONFIG_ENV) {
        let path = PathBuf::from(explicit);
        let text = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read {} ({CONFIG_ENV}): {e}", path.display()))?;
        return Ok((path, text));
    }
    for p in &CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok((PathBuf::from(p), text));
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", CONFIG_PATHS);
}

/// Parse the `[chart]` table. A file without one yields the defaults.
pub fn parse_chart_settings(text: &str) -> anyhow::Result<ChartSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml for chart settings: {e}"))?;
    let settings = match root.chart {
        Some(settings) => settings,
        None => {
            log::info!("no [chart] table in config; using default chart settings");
            ChartSettings::default()
        }
    };
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid [chart] settings: {e}"))?;
    Ok(settings)
}

pub fn load_chart_settings() -> anyhow::Result<ChartSettings> {
    let (path, text) = read_config_text()?;
    log::info!("loading chart settings from {}", path.display());
    parse_chart_settings(&text)
}
